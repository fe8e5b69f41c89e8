//! Shared application state and per-request backend handles.

use std::path::Path;
use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use kiln_auth::AuthClient;
use kiln_config::{ConfigError, KilnConfig, MIN_SECRET_KEY_LEN};
use kiln_db::KilnDb;
use kiln_storage::{DropboxClient, StorageError};
use kiln_upload::UploadSettings;

/// Cloned into every handler. Holds no per-user data.
#[derive(Clone)]
pub struct AppState {
    config: Arc<KilnConfig>,
    http: reqwest::Client,
    key: Key,
}

impl AppState {
    /// Build state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the secret key is too short to
    /// derive a cookie signing key from.
    pub fn new(config: KilnConfig) -> Result<Self, ConfigError> {
        if config.server.secret_key.len() < MIN_SECRET_KEY_LEN {
            return Err(ConfigError::InvalidValue {
                field: "server.secret_key".into(),
                reason: format!("must be at least {MIN_SECRET_KEY_LEN} bytes"),
            });
        }
        let key = Key::derive_from(config.server.secret_key.as_bytes());
        Ok(Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            key,
        })
    }

    #[must_use]
    pub fn config(&self) -> &KilnConfig {
        &self.config
    }

    #[must_use]
    pub const fn key(&self) -> &Key {
        &self.key
    }

    /// Connect to Dropbox for the duration of one request.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the refresh-token exchange fails.
    pub async fn dropbox(&self) -> Result<DropboxClient, StorageError> {
        DropboxClient::connect(&self.config.dropbox, self.http.clone()).await
    }

    #[must_use]
    pub fn db(&self) -> KilnDb {
        KilnDb::from_config(&self.config.supabase, self.http.clone())
    }

    #[must_use]
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(
            self.config.supabase.base_url(),
            &self.config.supabase.key,
            self.http.clone(),
        )
    }

    #[must_use]
    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings::from(&self.config.upload)
    }

    #[must_use]
    pub fn scratch_dir(&self) -> &Path {
        &self.config.server.scratch_dir
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

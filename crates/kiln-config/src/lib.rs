//! # kiln-config
//!
//! Layered configuration loading for kiln using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KILN_*` prefix, `__` as separator)
//! 2. Project-level `kiln.toml`
//! 3. User-level `~/.config/kiln/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KILN_DROPBOX__APP_KEY` -> `dropbox.app_key`,
//! `KILN_SERVER__SECRET_KEY` -> `server.secret_key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use kiln_config::KilnConfig;
//!
//! let config = KilnConfig::load_with_dotenv().expect("config");
//! config.validate_for_server().expect("server config");
//! println!("binding {}", config.server.bind_address());
//! ```

mod dropbox;
mod error;
mod server;
mod supabase;
mod team;
mod upload;

pub use dropbox::DropboxConfig;
pub use error::ConfigError;
pub use server::{MIN_SECRET_KEY_LEN, ServerConfig};
pub use supabase::SupabaseConfig;
pub use team::TeamConfig;
pub use upload::UploadConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every kiln setting.
pub const ENV_PREFIX: &str = "KILN_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KilnConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dropbox: DropboxConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub team: TeamConfig,
}

impl KilnConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from("kiln.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check everything the HTTP server needs before binding.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for a missing section and
    /// `ConfigError::InvalidValue` for a secret key that is too short.
    pub fn validate_for_server(&self) -> Result<(), ConfigError> {
        if !self.server.has_secret_key() {
            return Err(ConfigError::NotConfigured {
                section: "server.secret_key".into(),
            });
        }
        if self.server.secret_key.len() < MIN_SECRET_KEY_LEN {
            return Err(ConfigError::InvalidValue {
                field: "server.secret_key".into(),
                reason: format!("must be at least {MIN_SECRET_KEY_LEN} bytes"),
            });
        }
        if !self.dropbox.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "dropbox".into(),
            });
        }
        if !self.supabase.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "supabase".into(),
            });
        }
        if self.upload.chunk_size_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upload.chunk_size_bytes".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.upload.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upload.max_retries".into(),
                reason: "must allow at least one attempt".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kiln").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_ready() -> KilnConfig {
        let mut config = KilnConfig::default();
        config.server.secret_key = "k".repeat(MIN_SECRET_KEY_LEN);
        config.dropbox.app_key = "key".into();
        config.dropbox.app_secret = "secret".into();
        config.dropbox.refresh_token = "refresh".into();
        config.supabase.url = "https://abcd.supabase.co".into();
        config.supabase.key = "anon".into();
        config
    }

    #[test]
    fn default_config_is_not_server_ready() {
        let config = KilnConfig::default();
        assert!(!config.dropbox.is_configured());
        assert!(!config.supabase.is_configured());
        let err = config.validate_for_server().unwrap_err();
        assert!(err.to_string().contains("server.secret_key"));
    }

    #[test]
    fn complete_config_validates() {
        assert!(server_ready().validate_for_server().is_ok());
    }

    #[test]
    fn short_secret_is_rejected() {
        let mut config = server_ready();
        config.server.secret_key = "short".into();
        let err = config.validate_for_server().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn missing_supabase_is_reported() {
        let mut config = server_ready();
        config.supabase.key.clear();
        let err = config.validate_for_server().unwrap_err();
        assert!(err.to_string().contains("'supabase'"));
    }

    #[test]
    fn zero_retries_is_rejected() {
        let mut config = server_ready();
        config.upload.max_retries = 0;
        assert!(config.validate_for_server().is_err());
    }

    #[test]
    fn figment_builds_without_files() {
        let config: KilnConfig = KilnConfig::figment().extract().expect("defaults extract");
        assert_eq!(config.upload.max_retries, 5);
        assert_eq!(config.team.members.len(), 3);
    }
}

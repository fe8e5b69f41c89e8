//! Dropbox API configuration.

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    String::from("https://api.dropboxapi.com/2")
}

fn default_content_url() -> String {
    String::from("https://content.dropboxapi.com/2")
}

fn default_oauth_url() -> String {
    String::from("https://api.dropbox.com/oauth2/token")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DropboxConfig {
    /// App key (OAuth client id).
    #[serde(default)]
    pub app_key: String,

    /// App secret (OAuth client secret).
    #[serde(default)]
    pub app_secret: String,

    /// Long-lived refresh token exchanged for short-lived access tokens.
    #[serde(default)]
    pub refresh_token: String,

    /// RPC endpoint base.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Content (upload/download) endpoint base.
    #[serde(default = "default_content_url")]
    pub content_url: String,

    /// OAuth2 token endpoint.
    #[serde(default = "default_oauth_url")]
    pub oauth_url: String,
}

impl Default for DropboxConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            app_secret: String::new(),
            refresh_token: String::new(),
            api_url: default_api_url(),
            content_url: default_content_url(),
            oauth_url: default_oauth_url(),
        }
    }
}

impl DropboxConfig {
    /// Check if the Dropbox config has the credentials needed to mint access tokens.
    pub fn is_configured(&self) -> bool {
        !self.app_key.is_empty() && !self.app_secret.is_empty() && !self.refresh_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = DropboxConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.api_url, "https://api.dropboxapi.com/2");
        assert_eq!(config.content_url, "https://content.dropboxapi.com/2");
    }

    #[test]
    fn not_configured_without_refresh_token() {
        let config = DropboxConfig {
            app_key: "key".into(),
            app_secret: "secret".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn configured_with_all_credentials() {
        let config = DropboxConfig {
            app_key: "key".into(),
            app_secret: "secret".into(),
            refresh_token: "refresh".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}

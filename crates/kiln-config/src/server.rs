//! HTTP server configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Minimum secret length accepted for signing session cookies.
pub const MIN_SECRET_KEY_LEN: usize = 32;

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5000
}

fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join("kiln-scratch")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Secret used to sign the session cookie. Required to serve.
    #[serde(default)]
    pub secret_key: String,

    /// Per-process scratch directory for staged uploads.
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            secret_key: String::new(),
            scratch_dir: default_scratch_dir(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn has_secret_key(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert!(!config.has_secret_key());
        assert!(config.scratch_dir.ends_with("kiln-scratch"));
    }
}

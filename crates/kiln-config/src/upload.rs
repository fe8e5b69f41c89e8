//! Upload pipeline tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 8 MiB: files at or below this size go up in a single request.
const fn default_chunk_size_bytes() -> u64 {
    8 * 1024 * 1024
}

const fn default_max_retries() -> u32 {
    5
}

const fn default_base_delay_ms() -> u64 {
    1_000
}

const fn default_max_delay_ms() -> u64 {
    30_000
}

const fn default_session_restarts() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Chunk size for session uploads, also the single-request threshold.
    #[serde(default = "default_chunk_size_bytes")]
    pub chunk_size_bytes: u64,

    /// Attempts per request before the upload is reported as failed.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubles on every further attempt.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Cap on the backoff delay.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Whole-upload restarts allowed after a session offset mismatch.
    #[serde(default = "default_session_restarts")]
    pub session_restarts: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            chunk_size_bytes: default_chunk_size_bytes(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            session_restarts: default_session_restarts(),
        }
    }
}

impl UploadConfig {
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = UploadConfig::default();
        assert_eq!(config.chunk_size_bytes, 8 * 1024 * 1024);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.base_delay(), Duration::from_secs(1));
        assert_eq!(config.max_delay(), Duration::from_secs(30));
        assert_eq!(config.session_restarts, 1);
    }
}

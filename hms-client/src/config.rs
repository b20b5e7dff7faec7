//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Production backend, used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://sohraa-hms-production-803b.up.railway.app";

/// Client configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HMS_API_BASE_URL | production backend | Backend (or dev proxy) base URL |
/// | HMS_REQUEST_TIMEOUT_SECS | 30 | Per-request timeout |
/// | HMS_STATE_DIR | .hms | Where user/property snapshots are kept |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000/api/proxy")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Session refresh endpoint
    pub refresh_path: String,

    /// Directory for persisted snapshots
    pub state_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            refresh_path: "/auth/refresh".into(),
            state_dir: PathBuf::from(".hms"),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("HMS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        );
        if let Some(timeout) = std::env::var("HMS_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Ok(dir) = std::env::var("HMS_STATE_DIR") {
            config.state_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

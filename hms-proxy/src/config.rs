//! Proxy configuration

use std::time::Duration;

/// Production backend, used when `BACKEND_URL` is unset
pub const DEFAULT_BACKEND_URL: &str = "https://sohraa-hms-production-803b.up.railway.app";

/// Proxy configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | BACKEND_URL | production backend | Upstream origin requests are relayed to |
/// | HTTP_PORT | 3000 | Listen port |
/// | PROXY_PREFIX | /api/proxy | Path prefix stripped before forwarding |
/// | REQUEST_TIMEOUT_MS | 30000 | Upstream request timeout |
/// | MAX_BODY_BYTES | 10485760 | Largest request body accepted |
/// | LOG_DIR | - | Write daily log files here as well |
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub backend_url: String,
    pub http_port: u16,
    pub prefix: String,
    pub request_timeout_ms: u64,
    pub max_body_bytes: usize,
    pub log_dir: Option<String>,
}

impl ProxyConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            http_port: 3000,
            prefix: "/api/proxy".into(),
            request_timeout_ms: 30_000,
            max_body_bytes: 10 * 1024 * 1024,
            log_dir: None,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config =
            Self::new(std::env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.into()));

        config.http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(config.http_port);
        if let Ok(prefix) = std::env::var("PROXY_PREFIX") {
            config.prefix = normalize_prefix(&prefix);
        }
        config.request_timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.request_timeout_ms);
        config.max_body_bytes = std::env::var("MAX_BODY_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.max_body_bytes);
        config.log_dir = std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty());
        config
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = normalize_prefix(prefix);
        self
    }

    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = ms;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

/// Leading slash, no trailing slash
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    format!("/{trimmed}")
}

//! Client configuration

use std::time::Duration;

/// Default server address when `NEXT_PUBLIC_API_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the menu server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Whole-request timeout, connect through body
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read `NEXT_PUBLIC_API_URL` and `MENU_CLIENT_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let base_url = std::env::var("NEXT_PUBLIC_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("MENU_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(base_url).with_timeout(Duration::from_secs(timeout))
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

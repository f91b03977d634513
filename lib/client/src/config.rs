use std::time::Duration;

/// Configuration for the HMS API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, including the `/api` prefix. Trailing slashes are
    /// trimmed.
    pub base_url: String,
    /// Per-request timeout (default: 30s).
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

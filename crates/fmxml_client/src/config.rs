//! Configuration for the HTTP transport.

use std::time::Duration;

/// Settings for [`crate::ReqwestClient`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl HttpConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("fmxml/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

// Shared transport configuration for building reqwest::Client instances.
//
// The workbench server speaks plain HTTP on the local network, so transport
// tuning is limited to the request timeout and user agent. Keeping the
// builder behind one type keeps client construction uniform.

use std::time::Duration;

/// Transport configuration for the workbench HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("benchwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| crate::error::Error::Http(format!("failed to build HTTP client: {e}")))
    }
}

use std::time::Duration;

use crate::endpoint::{Endpoints, Mode};

pub const DEFAULT_SOAP_NAMESPACE: &str = "https://www.serviceobjects.com";
pub const DEFAULT_USER_AGENT: &str = "agi-client/0.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Clone)]
pub struct AgiConfig {
    pub license_key: String,
    pub mode: Mode,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    pub rest_endpoints: Endpoints,
    pub soap_endpoints: Endpoints,
    pub soap_namespace: String,
}

impl AgiConfig {
    /// Per-call timeout. Primary and backup attempts each get the full value.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for AgiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgiConfig")
            .field("license_key", &"[redacted]")
            .field("mode", &self.mode)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field("rest_endpoints", &self.rest_endpoints)
            .field("soap_endpoints", &self.soap_endpoints)
            .field("soap_namespace", &self.soap_namespace)
            .finish()
    }
}

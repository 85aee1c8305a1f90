use std::time::Duration;

use reqwest::Client;

use crate::error::AgiError;

/// Connection-establishment cap. The per-call timeout is applied per request
/// on top of this.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the pooled HTTP client shared by both attempts of every call.
pub(crate) fn build_http_client(user_agent: &str) -> Result<Client, AgiError> {
    Ok(Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(user_agent)
        .build()?)
}

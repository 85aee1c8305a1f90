//! JSON-over-GET binding.
//!
//! Each operation is a single GET against `<base>/<Operation>` with every
//! request field in the query string. The body is the JSON envelope described
//! in [`agi_core::model`]; an `Error` object in it is a successful call, not a
//! transport failure.

use std::time::Duration;

use agi_core::{AgiConfig, Endpoints, Mode, SearchResult, WireResponse, DEFAULT_USER_AGENT};
use reqwest::{Client, Url};

use crate::error::AgiError;
use crate::failover::{run_with_failover, BackupPolicy, FailoverTarget};
use crate::http::build_http_client;
use crate::request::{build_rest_url, Operation, PlaceSearchRequest, ReverseSearchRequest};

/// Async client for the REST binding.
///
/// Cheap to share: the inner `reqwest::Client` is reference-counted and the
/// struct holds no per-call state.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    license_key: String,
    mode: Mode,
    timeout: Duration,
    endpoints: Endpoints,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("license_key", &"[redacted]")
            .field("mode", &self.mode)
            .field("timeout", &self.timeout)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Creates a client from loaded configuration, using its REST endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`AgiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(config: &AgiConfig) -> Result<Self, AgiError> {
        Ok(Self {
            client: build_http_client(&config.user_agent)?,
            license_key: config.license_key.clone(),
            mode: config.mode,
            timeout: config.timeout(),
            endpoints: config.rest_endpoints.clone(),
        })
    }

    /// Creates a client against explicit endpoints (for testing with
    /// wiremock, or private deployments).
    ///
    /// # Errors
    ///
    /// Returns [`AgiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn with_endpoints(
        license_key: &str,
        mode: Mode,
        timeout: Duration,
        endpoints: Endpoints,
    ) -> Result<Self, AgiError> {
        Ok(Self {
            client: build_http_client(DEFAULT_USER_AGENT)?,
            license_key: license_key.to_owned(),
            mode,
            timeout,
            endpoints,
        })
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Forward geocoding.
    ///
    /// On a fatal primary result in live mode the backup's answer is returned
    /// whether or not it is itself valid.
    ///
    /// # Errors
    ///
    /// - [`AgiError::BothEndpointsFailed`] if the backup attempt fails after
    ///   the primary failed or returned a fatal error.
    /// - [`AgiError::InvalidEndpoint`] if a configured base URL is not a URL.
    pub async fn place_search(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<SearchResult, AgiError> {
        let params = request.params();
        self.call(Operation::PlaceSearch, &params, BackupPolicy::Unconditional)
            .await
    }

    /// Reverse geocoding.
    ///
    /// On a fatal primary result in live mode the backup's answer is used only
    /// if valid; otherwise the primary result is returned.
    ///
    /// # Errors
    ///
    /// - [`AgiError::BothEndpointsFailed`] if the primary fails at transport
    ///   level and the backup attempt fails too.
    /// - [`AgiError::InvalidEndpoint`] if a configured base URL is not a URL.
    pub async fn reverse_search(
        &self,
        request: &ReverseSearchRequest,
    ) -> Result<SearchResult, AgiError> {
        let params = request.params();
        self.call(
            Operation::ReverseSearch,
            &params,
            BackupPolicy::RevertToPrimaryIfInvalid,
        )
        .await
    }

    async fn call(
        &self,
        operation: Operation,
        params: &[(&str, &str)],
        policy: BackupPolicy,
    ) -> Result<SearchResult, AgiError> {
        let target = FailoverTarget::select(&self.endpoints, self.mode);
        run_with_failover(operation, target, policy, SearchResult::is_valid, |base| {
            self.invoke(base, operation, params)
        })
        .await
    }

    /// One GET against one endpoint.
    async fn invoke(
        &self,
        base: &str,
        operation: Operation,
        params: &[(&str, &str)],
    ) -> Result<SearchResult, AgiError> {
        let url = build_rest_url(base, operation, params, &self.license_key)?;
        tracing::debug!(%operation, endpoint = base, "GET");
        let body = self.request_json(&url).await?;
        parse_search_result(&body, &format!("{operation} at {base}"))
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and returns the body.
    ///
    /// # Errors
    ///
    /// Returns [`AgiError::Http`] on network failure, timeout, or a non-2xx
    /// status.
    async fn request_json(&self, url: &Url) -> Result<String, AgiError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Parses a REST body into a [`SearchResult`].
///
/// # Errors
///
/// - [`AgiError::Deserialize`] if the body is not JSON of the envelope shape.
/// - [`AgiError::Malformed`] if it carries neither results nor an error.
pub fn parse_search_result(body: &str, context: &str) -> Result<SearchResult, AgiError> {
    let wire: WireResponse = serde_json::from_str(body).map_err(|e| AgiError::Deserialize {
        context: context.to_owned(),
        source: e,
    })?;
    SearchResult::try_from(wire).map_err(|e| AgiError::Malformed {
        context: context.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;

//! SOAP 1.1 binding.
//!
//! Each operation POSTs an envelope to the endpoint and reads
//! `<OperationResult>` out of the reply. Unlike REST, a reply without a usable
//! result (fault, bad XML, missing or empty result element) is a transport
//! failure even when the HTTP status was 200.

mod envelope;
mod normalize;

use std::time::Duration;

use agi_core::{AgiConfig, Endpoints, Mode, SearchResult, DEFAULT_USER_AGENT};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use crate::error::AgiError;
use crate::failover::{run_with_failover, BackupPolicy, FailoverTarget};
use crate::http::build_http_client;
use crate::request::{Operation, PlaceSearchRequest, ReverseSearchRequest};

pub use agi_core::app_config::DEFAULT_SOAP_NAMESPACE;

/// Async client for the SOAP binding.
#[derive(Clone)]
pub struct SoapClient {
    client: Client,
    license_key: String,
    mode: Mode,
    timeout: Duration,
    endpoints: Endpoints,
    namespace: String,
}

impl std::fmt::Debug for SoapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoapClient")
            .field("license_key", &"[redacted]")
            .field("mode", &self.mode)
            .field("timeout", &self.timeout)
            .field("endpoints", &self.endpoints)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl SoapClient {
    /// Creates a client from loaded configuration, using its SOAP endpoints
    /// and namespace.
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
            endpoints: config.soap_endpoints.clone(),
            namespace: config.soap_namespace.clone(),
        })
    }

    /// Creates a client against explicit endpoints.
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
        namespace: &str,
    ) -> Result<Self, AgiError> {
        Ok(Self {
            client: build_http_client(DEFAULT_USER_AGENT)?,
            license_key: license_key.to_owned(),
            mode,
            timeout,
            endpoints,
            namespace: namespace.to_owned(),
        })
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Forward geocoding over SOAP.
    ///
    /// # Errors
    ///
    /// - [`AgiError::BothEndpointsFailed`] if the backup attempt fails after
    ///   the primary failed or returned a fatal error.
    /// - [`AgiError::InvalidEndpoint`] / [`AgiError::Envelope`] for local
    ///   misconfiguration.
    pub async fn place_search(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<SearchResult, AgiError> {
        self.call(Operation::PlaceSearch, &request.params()).await
    }

    /// Reverse geocoding over SOAP. Same failover policy as
    /// [`SoapClient::place_search`].
    ///
    /// # Errors
    ///
    /// See [`SoapClient::place_search`].
    pub async fn reverse_search(
        &self,
        request: &ReverseSearchRequest,
    ) -> Result<SearchResult, AgiError> {
        self.call(Operation::ReverseSearch, &request.params()).await
    }

    async fn call(
        &self,
        operation: Operation,
        params: &[(&str, &str)],
    ) -> Result<SearchResult, AgiError> {
        let target = FailoverTarget::select(&self.endpoints, self.mode);
        run_with_failover(
            operation,
            target,
            BackupPolicy::Unconditional,
            SearchResult::is_valid,
            |endpoint| self.invoke(endpoint, operation, params),
        )
        .await
    }

    /// One POST against one endpoint.
    async fn invoke(
        &self,
        endpoint: &str,
        operation: Operation,
        params: &[(&str, &str)],
    ) -> Result<SearchResult, AgiError> {
        let url = Url::parse(endpoint).map_err(|e| AgiError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        let body = envelope::build_envelope(&self.namespace, operation, params, &self.license_key)?;

        tracing::debug!(%operation, endpoint, "POST");
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", envelope::soap_action(&self.namespace, operation))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Faults are usually delivered with a 500.
            return match normalize::parse_response(&text, operation) {
                Err(fault @ AgiError::SoapFault { .. }) => Err(fault),
                _ => Err(AgiError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: endpoint.to_owned(),
                }),
            };
        }

        normalize::parse_response(&text, operation)
    }
}

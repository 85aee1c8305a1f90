//! Blocking wrappers around the async clients.
//!
//! Each wrapper owns a current-thread tokio runtime and blocks the calling
//! thread on the async operation, so results are identical to the async
//! clients for the same inputs.
//!
//! Do not call these from inside an async runtime; tokio panics when
//! `block_on` is nested.

use std::time::Duration;

use agi_core::{AgiConfig, Endpoints, Mode, SearchResult};
use tokio::runtime::{Builder, Runtime};

use crate::error::AgiError;
use crate::request::{PlaceSearchRequest, ReverseSearchRequest};

fn current_thread_runtime() -> Result<Runtime, AgiError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AgiError::Runtime)
}

/// Blocking REST client.
#[derive(Debug)]
pub struct RestClient {
    inner: crate::rest::RestClient,
    runtime: Runtime,
}

impl RestClient {
    /// # Errors
    ///
    /// Returns [`AgiError::Http`] if the HTTP client cannot be built or
    /// [`AgiError::Runtime`] if the runtime cannot be started.
    pub fn new(config: &AgiConfig) -> Result<Self, AgiError> {
        Self::from_async(crate::rest::RestClient::new(config)?)
    }

    /// # Errors
    ///
    /// See [`RestClient::new`].
    pub fn with_endpoints(
        license_key: &str,
        mode: Mode,
        timeout: Duration,
        endpoints: Endpoints,
    ) -> Result<Self, AgiError> {
        Self::from_async(crate::rest::RestClient::with_endpoints(
            license_key,
            mode,
            timeout,
            endpoints,
        )?)
    }

    /// Wraps an existing async client.
    ///
    /// # Errors
    ///
    /// Returns [`AgiError::Runtime`] if the runtime cannot be started.
    pub fn from_async(inner: crate::rest::RestClient) -> Result<Self, AgiError> {
        Ok(Self {
            inner,
            runtime: current_thread_runtime()?,
        })
    }

    /// Blocking [`crate::RestClient::place_search`].
    ///
    /// # Errors
    ///
    /// Same as the async call.
    pub fn place_search(&self, request: &PlaceSearchRequest) -> Result<SearchResult, AgiError> {
        self.runtime.block_on(self.inner.place_search(request))
    }

    /// Blocking [`crate::RestClient::reverse_search`].
    ///
    /// # Errors
    ///
    /// Same as the async call.
    pub fn reverse_search(
        &self,
        request: &ReverseSearchRequest,
    ) -> Result<SearchResult, AgiError> {
        self.runtime.block_on(self.inner.reverse_search(request))
    }
}

/// Blocking SOAP client.
#[derive(Debug)]
pub struct SoapClient {
    inner: crate::soap::SoapClient,
    runtime: Runtime,
}

impl SoapClient {
    /// # Errors
    ///
    /// Returns [`AgiError::Http`] if the HTTP client cannot be built or
    /// [`AgiError::Runtime`] if the runtime cannot be started.
    pub fn new(config: &AgiConfig) -> Result<Self, AgiError> {
        Self::from_async(crate::soap::SoapClient::new(config)?)
    }

    /// # Errors
    ///
    /// See [`SoapClient::new`].
    pub fn with_endpoints(
        license_key: &str,
        mode: Mode,
        timeout: Duration,
        endpoints: Endpoints,
        namespace: &str,
    ) -> Result<Self, AgiError> {
        Self::from_async(crate::soap::SoapClient::with_endpoints(
            license_key,
            mode,
            timeout,
            endpoints,
            namespace,
        )?)
    }

    /// Wraps an existing async client.
    ///
    /// # Errors
    ///
    /// Returns [`AgiError::Runtime`] if the runtime cannot be started.
    pub fn from_async(inner: crate::soap::SoapClient) -> Result<Self, AgiError> {
        Ok(Self {
            inner,
            runtime: current_thread_runtime()?,
        })
    }

    /// Blocking [`crate::SoapClient::place_search`].
    ///
    /// # Errors
    ///
    /// Same as the async call.
    pub fn place_search(&self, request: &PlaceSearchRequest) -> Result<SearchResult, AgiError> {
        self.runtime.block_on(self.inner.place_search(request))
    }

    /// Blocking [`crate::SoapClient::reverse_search`].
    ///
    /// # Errors
    ///
    /// Same as the async call.
    pub fn reverse_search(
        &self,
        request: &ReverseSearchRequest,
    ) -> Result<SearchResult, AgiError> {
        self.runtime.block_on(self.inner.reverse_search(request))
    }
}

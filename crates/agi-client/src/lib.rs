//! Client for the Address Geocode International (AGI) web service.
//!
//! Two bindings, [`RestClient`] (JSON over GET) and [`SoapClient`] (SOAP 1.1),
//! each expose `place_search` and `reverse_search`. Both route every call
//! through [`failover::run_with_failover`], which retries the backup endpoint
//! at most once. [`blocking`] wraps both for synchronous callers.

pub mod blocking;
pub mod error;
pub mod failover;
mod http;
pub mod request;
pub mod rest;
pub mod soap;

pub use error::AgiError;
pub use failover::{run_with_failover, BackupPolicy, FailoverTarget};
pub use request::{build_rest_url, Operation, PlaceSearchRequest, ReverseSearchRequest};
pub use rest::RestClient;
pub use soap::SoapClient;

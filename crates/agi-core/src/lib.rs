//! Shared types for the Address Geocode International (AGI) client.
//!
//! Holds the response model both bindings normalize into, endpoint selection
//! by [`Mode`], and environment-driven configuration. Nothing in this crate
//! touches the network.

pub mod app_config;
pub mod config;
pub mod endpoint;
pub mod model;

use thiserror::Error;

pub use app_config::{AgiConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use config::{load_agi_config, load_agi_config_from_env};
pub use endpoint::{Endpoints, Mode};
pub use model::{
    AddressComponents, ErrorDetails, Location, MalformedResponse, SearchInfo, SearchResult,
    WireResponse, FATAL_TYPE_CODE,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

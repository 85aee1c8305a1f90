use thiserror::Error;

use crate::request::Operation;

/// Errors returned by the AGI REST and SOAP clients.
#[derive(Debug, Error)]
pub enum AgiError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status and no usable payload.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The REST body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload parsed but carried neither results nor an error.
    #[error("malformed response for {context}: {reason}")]
    Malformed { context: String, reason: String },

    /// The SOAP body was not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The SOAP endpoint returned a `Fault` element.
    #[error("SOAP fault {code}: {message}")]
    SoapFault { code: String, message: String },

    /// The SOAP call succeeded but the operation result was absent or empty.
    #[error("{operation} SOAP response is empty or undefined")]
    EmptyResponse { operation: Operation },

    #[error("could not write SOAP envelope: {0}")]
    Envelope(String),

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Primary and backup attempts both failed; carries both diagnostics.
    #[error(
        "both primary and backup {operation} endpoints failed. \
         Primary error: {primary}. Backup error: {backup}"
    )]
    BothEndpointsFailed {
        operation: Operation,
        primary: String,
        backup: String,
    },

    /// The blocking wrapper could not build its runtime.
    #[error("failed to start blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl AgiError {
    /// Returns `true` for failures of a single network attempt, which are
    /// eligible for failover to the backup endpoint.
    ///
    /// Local misconfiguration (bad endpoint URL, envelope or runtime errors)
    /// would fail identically against the backup and is not eligible.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            AgiError::Http(_)
            | AgiError::UnexpectedStatus { .. }
            | AgiError::Deserialize { .. }
            | AgiError::Malformed { .. }
            | AgiError::Xml(_)
            | AgiError::SoapFault { .. }
            | AgiError::EmptyResponse { .. } => true,
            AgiError::Envelope(_)
            | AgiError::InvalidEndpoint { .. }
            | AgiError::BothEndpointsFailed { .. }
            | AgiError::Runtime(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soap_and_payload_failures_are_transport() {
        assert!(AgiError::EmptyResponse {
            operation: Operation::PlaceSearch
        }
        .is_transport());
        assert!(AgiError::SoapFault {
            code: "s:Server".to_owned(),
            message: "boom".to_owned()
        }
        .is_transport());
        assert!(AgiError::Malformed {
            context: "PlaceSearch".to_owned(),
            reason: "empty".to_owned()
        }
        .is_transport());
    }

    #[test]
    fn local_misconfiguration_is_not_transport() {
        assert!(!AgiError::InvalidEndpoint {
            url: "nope".to_owned(),
            reason: "relative URL without a base".to_owned()
        }
        .is_transport());
        assert!(!AgiError::Envelope("io".to_owned()).is_transport());
    }

    #[test]
    fn double_failure_message_names_both_attempts() {
        let err = AgiError::BothEndpointsFailed {
            operation: Operation::ReverseSearch,
            primary: "connection refused".to_owned(),
            backup: "operation timed out".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ReverseSearch"));
        assert!(msg.contains("connection refused"));
        assert!(msg.contains("operation timed out"));
    }
}

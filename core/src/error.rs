//! Error types for the crmsport client.
//!
//! # Design
//! Only conditions the caller has to act on become `ApiError`. A transport
//! fault or an unparsable body degrades the result of a single call instead
//! (see `ParsedResponse`), so `TransportError` never escapes `execute`.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by `CrmClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The action name is not in the registry.
    #[error("unknown action `{0}`")]
    UnknownAction(String),

    /// Host, port or scheme settings could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The server answered 4xx or 5xx. `body` holds the parsed JSON body, or
    /// the raw text as a JSON string when it was not valid JSON.
    #[error("server returns error with code {status}")]
    ServerRejection { status: u16, body: Value },
}

impl ApiError {
    /// Status code of a server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerRejection { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A network-level failure reported by a `Transport`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> Self {
        TransportError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_display_includes_status() {
        let err = ApiError::ServerRejection {
            status: 404,
            body: serde_json::json!({"error": "not found"}),
        };
        assert_eq!(err.to_string(), "server returns error with code 404");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn unknown_action_names_the_action() {
        let err = ApiError::UnknownAction("teams_delete".to_string());
        assert_eq!(err.to_string(), "unknown action `teams_delete`");
        assert_eq!(err.status(), None);
    }
}

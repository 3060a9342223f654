//! Response interpretation: status classification, body parsing and session
//! header harvesting.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::headers::HeaderStore;
use crate::http::HttpResponse;
use crate::observer::Observer;

/// Result of one dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// `None` when the request never got a response.
    pub status: Option<u16>,
    /// Parsed JSON body; an empty object when there was nothing usable.
    pub body: Value,
}

impl ParsedResponse {
    pub fn transport_failure() -> Self {
        Self {
            status: None,
            body: empty_body(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_some()
    }

    /// Deserializes the body into a caller-chosen type.
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.body.clone())
    }
}

fn empty_body() -> Value {
    Value::Object(Map::new())
}

/// Parses a response body. A blank body is an empty object.
pub fn parse_body(raw: &str) -> serde_json::Result<Value> {
    if raw.trim().is_empty() {
        return Ok(empty_body());
    }
    serde_json::from_str(raw)
}

/// Classifies `response`, updates `session` and yields the parsed body.
///
/// A 4xx or 5xx status is returned as `ApiError::ServerRejection` and leaves
/// `session` untouched. An unparsable body on a successful response is
/// reported to `observer` and replaced by an empty object.
pub fn interpret(
    response: &HttpResponse,
    session: &mut HeaderStore,
    observer: &mut dyn Observer,
) -> Result<ParsedResponse, ApiError> {
    if response.is_error() {
        observer.server_rejected(response.status);
        let body = match parse_body(&response.body) {
            Ok(body) => {
                observer.body_parsed(&body);
                body
            }
            Err(e) => {
                observer.body_unparsable(&e);
                Value::String(response.body.clone())
            }
        };
        return Err(ApiError::ServerRejection {
            status: response.status,
            body,
        });
    }

    let body = match parse_body(&response.body) {
        Ok(body) => {
            observer.body_parsed(&body);
            body
        }
        Err(e) => {
            observer.body_unparsable(&e);
            empty_body()
        }
    };

    observer.response_received(response.status);
    for name in session.record(&response.headers) {
        if let Some(value) = session.get(name) {
            observer.header_recorded(name, value);
        }
    }

    Ok(ParsedResponse {
        status: Some(response.status),
        body,
    })
}

//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! The dispatcher only knows the `Transport` trait, so tests can swap the
//! network for a closure. `UreqTransport` builds a new agent per request:
//! every call opens its own connection and nothing is pooled. Redirects are
//! not followed; a 3xx reaches the interpreter like any other status.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub trait Transport {
    /// Performs the round-trip. 4xx and 5xx responses are returned as data;
    /// only network-level failures are errors.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// Blocking transport backed by ureq.
#[derive(Debug, Default, Clone, Copy)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .new_agent();

        let mut response = match request {
            HttpRequest::Get { url, headers } => {
                let mut builder = agent.get(url);
                for (name, value) in headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()?
            }
            HttpRequest::Post { url, headers, form } => {
                let mut builder = agent.post(url);
                for (name, value) in headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match form {
                    Some(body) => builder.content_type(FORM_CONTENT_TYPE).send(body.as_bytes())?,
                    None => builder.send_empty()?,
                }
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // Undecodable bytes surface later as a body parse diagnostic.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

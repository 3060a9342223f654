//! Progress and diagnostic hooks for the request pipeline.
//!
//! Nothing here affects the result of a call. `TracingObserver` is the
//! default; front ends that want human-readable console output supply their
//! own implementation.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::action::ActionDescriptor;
use crate::error::TransportError;
use crate::http::HttpRequest;

pub trait Observer {
    /// Called right before the request goes to the transport.
    fn request_sent(&mut self, _descriptor: &ActionDescriptor, _request: &HttpRequest) {}

    fn transport_failed(&mut self, _descriptor: &ActionDescriptor, _error: &TransportError) {}

    /// Non-error status received.
    fn response_received(&mut self, _status: u16) {}

    fn body_parsed(&mut self, _body: &Value) {}

    fn body_unparsable(&mut self, _error: &serde_json::Error) {}

    /// A session header was stored from the response.
    fn header_recorded(&mut self, _name: &str, _value: &str) {}

    fn server_rejected(&mut self, _status: u16) {}
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl Observer for SilentObserver {}

/// Emits every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn request_sent(&mut self, descriptor: &ActionDescriptor, request: &HttpRequest) {
        info!(
            action = descriptor.name,
            method = request.method().as_str(),
            path = descriptor.path,
            "{}",
            descriptor.description
        );
        for (name, value) in request.headers() {
            debug!(header = %name, %value, "outgoing header");
        }
    }

    fn transport_failed(&mut self, descriptor: &ActionDescriptor, error: &TransportError) {
        warn!(action = descriptor.name, %error, "HTTP-error");
    }

    fn response_received(&mut self, status: u16) {
        info!(status, "server returns {status}");
    }

    fn body_parsed(&mut self, body: &Value) {
        debug!(%body, "response body");
    }

    fn body_unparsable(&mut self, error: &serde_json::Error) {
        warn!(%error, "can't parse response");
    }

    fn header_recorded(&mut self, name: &str, value: &str) {
        debug!(header = name, value, "session header stored");
    }

    fn server_rejected(&mut self, status: u16) {
        warn!(status, "server returns error with code {status}");
    }
}

//! Request dispatcher for the crmsport API.
//!
//! # Design
//! `CrmClient` owns the session headers, so every request it sends carries
//! the tokens harvested from the previous response. Dispatch is split the
//! same way as the wire: `build` produces an `HttpRequest` without touching
//! the network, the `Transport` performs the round-trip, and `interpret`
//! consumes the `HttpResponse`. `execute` chains the three.

use tracing::{debug, warn};

use crate::action::{self, ActionDescriptor};
use crate::config::Endpoint;
use crate::error::ApiError;
use crate::headers::HeaderStore;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::observer::{Observer, TracingObserver};
use crate::response::{self, ParsedResponse};
use crate::transport::{Transport, UreqTransport};
use crate::uri;

/// Headers sent with every request before session headers are merged in.
pub const BASE_HEADERS: [(&str, &str); 2] = [("Accept", "application/json"), ("Api-Version", "1")];

pub struct CrmClient<T = UreqTransport> {
    endpoint: Endpoint,
    transport: T,
    session: HeaderStore,
    observer: Box<dyn Observer>,
}

impl CrmClient<UreqTransport> {
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_transport(endpoint, UreqTransport)
    }
}

impl<T: Transport> CrmClient<T> {
    pub fn with_transport(endpoint: Endpoint, transport: T) -> Self {
        Self {
            endpoint,
            transport,
            session: HeaderStore::new(),
            observer: Box::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn session(&self) -> &HeaderStore {
        &self.session
    }

    /// Builds the request for `action` with the current session headers.
    pub fn build(&self, action: &str, params: &[(&str, &str)]) -> Result<HttpRequest, ApiError> {
        let descriptor = action::lookup(action)?;
        self.build_for(descriptor, params)
    }

    fn build_for(
        &self,
        descriptor: &ActionDescriptor,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        for (name, _) in params {
            if !descriptor.accepts(name) {
                warn!(action = descriptor.name, param = *name, "parameter not declared by action");
            }
        }

        let url = uri::build_uri(&self.endpoint, descriptor, params)?;
        let base: Vec<(String, String)> = BASE_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let headers = self.session.apply(&base);

        Ok(match descriptor.method {
            HttpMethod::Get => HttpRequest::Get {
                url: url.into(),
                headers,
            },
            HttpMethod::Post => HttpRequest::Post {
                url: url.into(),
                headers,
                form: descriptor.accepts_params().then(|| uri::encode_form(params)),
            },
        })
    }

    /// Interprets a response received for a request built by this client,
    /// storing its session headers on success.
    pub fn interpret(&mut self, response: &HttpResponse) -> Result<ParsedResponse, ApiError> {
        response::interpret(response, &mut self.session, &mut *self.observer)
    }

    /// Runs `action` end to end.
    ///
    /// A network failure is reported to the observer and yields
    /// [`ParsedResponse::transport_failure`]; it is never retried. A 4xx/5xx
    /// answer is returned as [`ApiError::ServerRejection`].
    pub fn execute(&mut self, action: &str, params: &[(&str, &str)]) -> Result<ParsedResponse, ApiError> {
        let descriptor = action::lookup(action)?;
        let request = self.build_for(descriptor, params)?;

        debug!(action = descriptor.name, url = request.url(), "dispatching");
        self.observer.request_sent(descriptor, &request);

        match self.transport.send(&request) {
            Ok(response) => self.interpret(&response),
            Err(e) => {
                self.observer.transport_failed(descriptor, &e);
                Ok(ParsedResponse::transport_failure())
            }
        }
    }

    pub fn user_sign_in(&mut self, email: &str, password: &str) -> Result<ParsedResponse, ApiError> {
        self.execute(action::USER_AUTH, &[("email", email), ("password", password)])
    }

    pub fn users_list(&mut self) -> Result<ParsedResponse, ApiError> {
        self.execute(action::USERS_LIST, &[])
    }

    pub fn teams_list(&mut self) -> Result<ParsedResponse, ApiError> {
        self.execute(action::TEAMS_LIST, &[])
    }
}

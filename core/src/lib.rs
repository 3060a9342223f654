//! Synchronous client core for the crmsport API.
//!
//! # Overview
//! Actions are declared once in a static registry. Dispatching one looks up
//! its descriptor, builds the URL and the GET or POST request, attaches the
//! session headers harvested from earlier responses, sends it over a
//! `Transport` and interprets the reply.
//!
//! # Design
//! - `CrmClient` owns the session (`HeaderStore`); there is no global state.
//! - `build` / `interpret` are pure with respect to the network, so the
//!   pipeline is testable without a server; `execute` chains them.
//! - Server rejections are typed errors. Transport faults and unparsable
//!   bodies degrade the result of the single call.
//! - Progress output goes through the `Observer` trait.

pub mod action;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod observer;
pub mod response;
pub mod transport;
pub mod uri;

pub use action::{actions, lookup, ActionDescriptor};
pub use client::CrmClient;
pub use config::{Endpoint, Scheme};
pub use error::{ApiError, TransportError};
pub use headers::HeaderStore;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use observer::{Observer, SilentObserver, TracingObserver};
pub use response::ParsedResponse;
pub use transport::{Transport, UreqTransport};

//! HTTP transport types shared by the dispatcher and the transports.
//!
//! # Design
//! Requests are described as plain data so the dispatcher can be exercised
//! without a network. A request is one of two tagged variants, GET carrying
//! its parameters in the URL and POST carrying them as a form body, which
//! mirrors the only two shapes an action can take.

use serde::{Deserialize, Serialize};

/// HTTP method of an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An outgoing request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpRequest {
    /// Parameters, if any, are already encoded into `url`.
    Get {
        url: String,
        headers: Vec<(String, String)>,
    },
    /// `form` is an `application/x-www-form-urlencoded` body.
    Post {
        url: String,
        headers: Vec<(String, String)>,
        form: Option<String>,
    },
}

impl HttpRequest {
    pub fn method(&self) -> HttpMethod {
        match self {
            HttpRequest::Get { .. } => HttpMethod::Get,
            HttpRequest::Post { .. } => HttpMethod::Post,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            HttpRequest::Get { url, .. } | HttpRequest::Post { url, .. } => url,
        }
    }

    pub fn headers(&self) -> &[(String, String)] {
        match self {
            HttpRequest::Get { headers, .. } | HttpRequest::Post { headers, .. } => headers,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            HttpRequest::Get { .. } => None,
            HttpRequest::Post { form, .. } => form.as_deref(),
        }
    }
}

/// A response as handed back by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// 4xx and 5xx responses.
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.status)
    }

    /// First header value whose name matches `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

//! Endpoint configuration.
//!
//! Host and port come from the `host` and `port` environment variables; the
//! scheme is chosen in code.

use crate::error::ApiError;

pub const DEFAULT_HOST: &str = "crmsport.ru";
pub const DEFAULT_PORT: u16 = 80;

pub const HOST_VAR: &str = "host";
pub const PORT_VAR: &str = "port";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Where requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl Endpoint {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            scheme: Scheme::Http,
            host: host.to_string(),
            port,
        }
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds an endpoint from a variable lookup, falling back to the defaults
    /// for unset or blank values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = present(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match present(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ApiError::InvalidConfig(format!("invalid port `{raw}`")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self::new(host.trim(), port))
    }
}

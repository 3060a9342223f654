//! Session header state harvested from responses.
//!
//! The remote service authenticates with token headers instead of cookies:
//! every successful response may carry a fresh `access-token` (plus `client`
//! and `uid`), and the next request must send the latest values back.

use std::collections::BTreeMap;

/// Header names captured from responses.
pub const RECORDED_HEADERS: [&str; 5] = [
    "refresh-token",
    "access-token",
    "firebase-token",
    "client",
    "uid",
];

/// Header names sent back on outgoing requests.
pub const FORWARDED_HEADERS: [&str; 3] = ["access-token", "client", "uid"];

/// Latest value of each recorded header. Last write wins; never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderStore {
    values: BTreeMap<&'static str, String>,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        canonical(name).and_then(|n| self.values.get(n)).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `headers` followed by every stored forwarded header whose name
    /// is not already present. Existing entries are left untouched.
    pub fn apply(&self, headers: &[(String, String)]) -> Vec<(String, String)> {
        let mut out = headers.to_vec();
        for name in FORWARDED_HEADERS {
            let Some(value) = self.values.get(name) else {
                continue;
            };
            if !out.iter().any(|(k, _)| k.eq_ignore_ascii_case(name)) {
                out.push((name.to_string(), value.clone()));
            }
        }
        out
    }

    /// Stores every recorded header found in `response_headers` and returns
    /// the names written, in allow-list order.
    pub fn record(&mut self, response_headers: &[(String, String)]) -> Vec<&'static str> {
        let mut written = Vec::new();
        for name in RECORDED_HEADERS {
            let found = response_headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name));
            if let Some((_, value)) = found {
                self.values.insert(name, value.clone());
                written.push(name);
            }
        }
        written
    }
}

fn canonical(name: &str) -> Option<&'static str> {
    RECORDED_HEADERS
        .into_iter()
        .find(|n| n.eq_ignore_ascii_case(name))
}

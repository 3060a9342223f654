//! Human-readable progress output for the console.

use std::io::Write;

use colored::Colorize;
use crmsport_core::{ActionDescriptor, HttpRequest, Observer, TransportError};
use serde_json::Value;

const TAB: &str = "   ";

/// Prints every pipeline event to `out`, indented and colored. Write errors
/// are dropped.
pub struct ConsoleObserver<W> {
    out: W,
}

impl ConsoleObserver<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{text}");
    }

    fn header_line(&mut self, name: &str, value: &str) {
        self.line(format!("{TAB}{TAB}{TAB} {} {name}: {value}", "Header".dimmed()));
    }
}

impl<W: Write> Observer for ConsoleObserver<W> {
    fn request_sent(&mut self, descriptor: &ActionDescriptor, request: &HttpRequest) {
        self.line(format!("{TAB}{}", descriptor.description.green()));
        self.line(format!(
            "{TAB}{TAB}--> {} {}",
            request.method().as_str().black().on_white().bold(),
            descriptor.path
        ));
        if !request.headers().is_empty() {
            for (name, value) in request.headers() {
                self.header_line(name, value);
            }
            self.line("");
        }
    }

    fn transport_failed(&mut self, _descriptor: &ActionDescriptor, error: &TransportError) {
        self.line(format!("HTTP-error: {error}").red());
    }

    fn response_received(&mut self, status: u16) {
        self.line(format!("{TAB}{TAB}<-- Server returns {status}").green());
    }

    fn body_parsed(&mut self, body: &Value) {
        self.line(format!("{TAB}{TAB}|_{body}"));
    }

    fn body_unparsable(&mut self, error: &serde_json::Error) {
        self.line(format!("{TAB}{TAB}|_ Can't parse response: {error}"));
    }

    fn header_recorded(&mut self, name: &str, value: &str) {
        self.header_line(name, value);
    }

    fn server_rejected(&mut self, status: u16) {
        self.line(format!("{TAB}{TAB}<-- Server returns error with code {status}").red());
    }
}

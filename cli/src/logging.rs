//! Tracing subscriber setup.
//!
//! `-v` flags take precedence over `RUST_LOG`; with neither, only warnings
//! are shown so the console output stays readable.

use tracing_subscriber::EnvFilter;

pub fn level_for(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

pub fn init(verbosity: u8) {
    let filter = match level_for(verbosity) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only the report. `RUST_LOG` takes
//! precedence over the `--log-level` flag.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive_for(level)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

/// Map loose level names ("WARNING", "Info") to tracing directives.
fn directive_for(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        other => other.to_string(),
    }
}

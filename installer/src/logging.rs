//! Stderr log output for the `packget` binary.
//!
//! Library code only emits records through `log` macros. The binary calls
//! [`init`] once, which installs a `tracing-subscriber` formatter on stderr
//! and bridges `log` records into it. `PACKGET_LOG` overrides the level
//! chosen on the command line with an `EnvFilter` directive string.

use log::LevelFilter;
use std::error::Error;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an optional filter directive.
pub const LOG_ENV: &str = "PACKGET_LOG";

/// Install the stderr subscriber.
///
/// # Errors
///
/// Returns an error when a global subscriber or `log` logger is already
/// installed.
pub fn init(level: LevelFilter) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .try_init()
}

/// Filter that enables everything at or above `level`.
#[must_use]
pub fn default_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::default().add_directive(level.as_trace().into())
}

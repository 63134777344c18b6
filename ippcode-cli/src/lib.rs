//! IPPcode24 command-line harness.
//!
//! The `ippi` binary is a thin shell over [`commands`]; this library holds
//! the command implementations so they can be tested in-process.

pub mod commands;

use std::sync::Once;

/// Exit status for malformed command lines.
pub const EXIT_USAGE: i32 = 10;
/// Exit status for unreadable input files.
pub const EXIT_INPUT: i32 = 11;
/// Exit status for unwritable output files.
pub const EXIT_OUTPUT: i32 = 12;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "IPPI_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

static LOGGING_INIT: Once = Once::new();

/// Install the stderr log subscriber. Safe to call more than once.
///
/// The filter comes from `IPPI_LOG` (e.g. `IPPI_LOG=ippcode_vm=trace`);
/// an unset or unparsable value falls back to `warn`.
pub fn init_logging() {
    LOGGING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let builder = fmt().with_writer(std::io::stderr).with_target(true);
        let builder = match std::env::var(LOG_ENV)
            .ok()
            .and_then(|expr| EnvFilter::try_new(expr).ok())
        {
            Some(filter) => builder.with_env_filter(filter),
            None => builder.with_env_filter(DEFAULT_LOG_FILTER),
        };

        let _ = builder.try_init();
    });
}

//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Environment variable holding a tracing filter, e.g. `PYPROBE_LOG=pyprobe=debug`.
pub const LOG_ENV: &str = "PYPROBE_LOG";

/// Initialize logging to stderr.
///
/// `PYPROBE_LOG` wins when set and valid; otherwise `pyprobe=debug` with
/// `verbose`, `pyprobe=info` without. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
            if verbose {
                EnvFilter::new("pyprobe=debug,pyprobe_analyze=debug")
            } else {
                EnvFilter::new("pyprobe=info,pyprobe_analyze=info")
            }
        });

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();
    });
}

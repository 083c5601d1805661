use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the `tracing` filter for test runs.
pub const LOG_ENV: &str = "REFCHECK_LOG";

/// Install a test-friendly `tracing` subscriber.
///
/// Output goes through the libtest capture writer, filtered by
/// `REFCHECK_LOG` (default `warn`). Safe to call from every test: only the
/// first call in a process installs anything.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_test_writer())
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("refcheck test logging initialized");
    }
}

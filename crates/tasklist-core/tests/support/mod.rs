use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a test-writer subscriber filtered by `TASKLIST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKLIST_LOG")
        .unwrap_or_else(|_| EnvFilter::new("tasklist_core=debug,warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}

//! Tracing setup for the `themepack` binary.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Diagnostics go to stderr so stdout stays reserved for compile output.
/// Verbosity is controlled through `RUST_LOG`; the default only surfaces
/// warnings such as luminosity channel underflow.
pub fn initialize() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

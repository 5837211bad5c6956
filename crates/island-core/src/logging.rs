//! `tracing` subscriber setup.
//!
//! Components log through the `tracing` macros with structured fields; the
//! binary installs one global subscriber at startup.

use tracing_subscriber::EnvFilter;

/// Default filter when verbose output is off.
pub const DEFAULT_LEVEL: &str = "info";

/// Filter used when verbose output is requested.
pub const VERBOSE_LEVEL: &str = "debug";

/// Filter directive for the requested verbosity.
pub fn level_for(verbose: bool) -> &'static str {
    if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL }
}

/// Initialize the global tracing subscriber with stderr output.
///
/// `RUST_LOG` takes precedence over `level` when set. Subsequent calls are no-ops.
pub fn init_subscriber(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // set_global_default is a no-op if already set
    let _ = subscriber.try_init();
}

//! Structured log setup for the command-line tool

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity choice
pub const fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "tilecomposer=debug",
        (false, true) => "error",
        (false, false) => "tilecomposer=info",
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the default filter
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(verbose: bool, quiet: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

// src/logging.rs
// =============================================================================
// Sets up `tracing` for the whole program.
//
// Diagnostics go to stderr so stdout stays clean for the summary (and for
// --json). RUST_LOG overrides the default filter, e.g.
//   RUST_LOG=keyword_spider=debug,headless_chrome=warn
// =============================================================================

use tracing_subscriber::{fmt, EnvFilter};

// Initialises the global subscriber
//
// Parameters:
//   verbose: default to debug-level output for this crate instead of info
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "keyword_spider=debug"
    } else {
        "keyword_spider=info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // try_init: a second call (e.g. from tests) is not an error worth crashing over
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

//! Logging setup
//!
//! Installs a `tracing-subscriber` formatter writing to stderr, so stdout
//! stays reserved for CSV output. The filter defaults to `bank_account=info`
//! and can be overridden through `RUST_LOG`.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "bank_account=info";

/// Initializes the global tracing subscriber
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A subscriber installed elsewhere (tests, embedding apps) wins
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

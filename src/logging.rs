//! Tracing setup for binaries and tools embedding the mapper

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `debug` when `verbose`, else `info`.
/// Mapper statements are logged at `debug`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    // A subscriber may already be installed (tests, host applications).
    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init();
}

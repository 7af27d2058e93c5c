//! Logging setup.
//!
//! Everything in the crate logs through `tracing`; the binary installs one
//! fmt subscriber filtered by `RUST_LOG`.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info,trivia=debug,tower_http=debug";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging() -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
}

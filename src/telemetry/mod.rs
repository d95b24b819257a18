//! Tracing setup for the server binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when RUST_LOG is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info,pointing_poker=info,tower_http=info,axum=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Errors if one is already installed.
///
/// RUST_LOG=debug,tower_http=info shows ignored room commands.
pub fn init() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true).compact())
        .try_init()?;
    Ok(())
}

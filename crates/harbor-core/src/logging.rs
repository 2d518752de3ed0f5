//! Tracing subscriber setup.
//!
//! `RUST_LOG` always wins over the filter passed in, so a single frame loop
//! can be inspected with e.g. `RUST_LOG=harbor_ui::manager=trace`.

use tracing_subscriber::EnvFilter;

/// Default filter used when neither `RUST_LOG` nor a config filter is set.
pub const DEFAULT_FILTER: &str = "info,harbor_ui=debug";

/// Install the global fmt subscriber, panicking if one is already set.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .init();
}

/// Install the global fmt subscriber with `default_filter` as fallback.
///
/// Returns an error when a global subscriber is already installed, which is
/// common in tests where several cases race to set one up.
pub fn try_init(
    default_filter: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_target(true)
        .try_init()
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

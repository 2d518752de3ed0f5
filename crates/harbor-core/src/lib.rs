//! Harbor Core
//!
//! Ambient functionality shared by the Harbor crates: logging setup,
//! puffin profiling, configuration and a few re-exported building blocks.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod math;
pub mod profiling;

pub use config::{Config, ProfilingMode};

/// Initialize logging and profiling according to `config`.
///
/// Logging is installed first so that profiler startup messages are visible.
/// Calling this more than once keeps the first subscriber.
pub fn init(config: &Config) {
    if let Err(err) = logging::try_init(&config.log_filter) {
        tracing::debug!("logging already initialized: {}", err);
    }

    match config.profiling {
        ProfilingMode::Off => {}
        ProfilingMode::On => puffin::set_scopes_on(true),
        ProfilingMode::WithWebserver => {
            profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp)
        }
    }
}

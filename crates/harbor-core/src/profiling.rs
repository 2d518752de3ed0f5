//! Profiling utilities based on the `puffin` crate.
//!
//! The dock manager wraps every frame update in `profile_function!`, so a
//! host only needs to call [`new_frame`] once per rendered frame.

use std::sync::OnceLock;

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Address the puffin HTTP server listens on.
pub const PUFFIN_ADDR: &str = "0.0.0.0:8585";

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Send profiling data to puffin_viewer via HTTP.
    PuffinHttp,
}

/// Global profiling server instance.
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use harbor_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    match backend {
        ProfilingBackend::PuffinHttp => {
            puffin::set_scopes_on(true);

            if PROFILING_SERVER.get().is_some() {
                tracing::debug!("Puffin profiler server already running");
                return;
            }

            match puffin_http::Server::new(PUFFIN_ADDR) {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://{}", PUFFIN_ADDR);
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server: {}", e);
                }
            }
        }
    }
}

/// Whether profiling scopes are currently being recorded.
#[inline]
pub fn is_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Mark the start of a new frame for profiling.
///
/// Call this once per frame in your main loop, before updating dock hosts.
///
/// # Example
/// ```no_run
/// use harbor_core::profiling::new_frame;
///
/// loop {
///     new_frame();
///     // ... update dock hosts ...
/// }
/// ```
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

//! Test utilities for Harbor.
//!
//! This crate provides testing infrastructure for dock hosts without a real
//! UI backend.
//!
//! # Overview
//!
//! - `MockDockSurface` - records every surface call and checks that begin/end
//!   and push/pop calls nest correctly (requires `mock` feature)
//! - [`SpyPanel`] / [`SpyControl`] - controls that log their updates to a
//!   shared [`UpdateLog`]
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use harbor_test_utils::{MockDockSurface, SpyPanel, UpdateLog};
//! use harbor_ui::{DockManager, Updatable};
//!
//! let log = UpdateLog::new();
//! let mut dock = DockManager::new().with_label("Editor");
//! dock.add_panel(SpyPanel::new("Scene", &log));
//!
//! let mut surface = MockDockSurface::new();
//! dock.update(&mut surface);
//!
//! assert_eq!(log.entries(), ["Scene"]);
//! assert!(surface.is_balanced());
//! # }
//! ```
//!
//! # Design Philosophy
//!
//! ## Fail fast
//!
//! The mock panics as soon as a closing call does not match the innermost
//! open scope, so the offending frame shows up in the backtrace instead of
//! as a count mismatch at the end of the test.
//!
//! ## Shared logs
//!
//! Controls are boxed and owned by the collection under test, so they report
//! through an `Arc<Mutex<..>>` log the test keeps a clone of.

#[cfg(feature = "mock")]
pub mod mock_surface;
pub mod spy;

#[cfg(feature = "mock")]
pub use mock_surface::*;
pub use spy::*;

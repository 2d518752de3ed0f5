//! Harbor UI - dock hosting for immediate mode editor shells
//!
//! This crate owns the lifetime of dockable panels inside a full-window
//! docking surface:
//! - Capability traits (`Updatable`, `Removable`, `Droppable`) instead of a
//!   fixed control hierarchy
//! - A control collection that defers removals requested mid-iteration
//! - Scope guards that keep surface begin/end calls balanced
//! - Process-wide unique ids for surface keys
//!
//! The layout engine itself is abstracted behind [`DockSurface`]; see
//! `harbor-egui` for an egui implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # use harbor_ui::{DockManager, DockSurface, Panel, Removable, Updatable};
//! # fn frame(surface: &mut dyn DockSurface) {
//! let mut dock = DockManager::new().with_label("Editor");
//! dock.add_panel(Panel::new("Scene"));
//! dock.add_panel(Panel::new("Inspector"));
//!
//! // Once per frame:
//! dock.update(surface);
//!
//! // The owner drops the host after it reports itself removable.
//! if dock.should_be_removed() {
//!     drop(dock);
//! }
//! # }
//! ```

pub mod capability;
pub mod collection;
pub mod error;
pub mod id;
pub mod manager;
pub mod panel;
pub mod scope;
pub mod style;
pub mod surface;

pub use capability::{Control, DockPanel, Droppable, Removable, Updatable};
pub use collection::{ControlCollection, ControlId, LockedControls, UnlockReport};
pub use error::{CollectionError, CollectionResult};
pub use id::{BASE_ID, DockId, IdAllocator};
pub use manager::{DockManager, DockState};
pub use panel::{Panel, PanelContent};
pub use scope::{DockRegionScope, PanelScope, SpacingScope, SurfaceScope};
pub use style::DockStyle;
pub use surface::{DockSurface, SpacingKind};

static_assertions::assert_impl_all!(DockManager: Control, Send);
static_assertions::assert_impl_all!(Panel: DockPanel, Send);
static_assertions::assert_impl_all!(IdAllocator: Send, Sync);
static_assertions::assert_obj_safe!(DockSurface, Control, DockPanel);

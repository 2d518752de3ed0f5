//! Capability traits for controls hosted by a dock manager.
//!
//! Controls opt into behaviour by implementing small independent traits
//! instead of extending a fixed base type. The collection and the dock
//! manager discover those capabilities through the query methods on
//! [`Control`], which return `None` unless the control overrides them.
//!
//! ```rust,ignore
//! fn retire(control: &dyn Control) -> bool {
//!     control
//!         .as_removable()
//!         .is_some_and(|removable| removable.should_be_removed())
//! }
//! ```

use crate::surface::DockSurface;

/// Capability: updated once per frame.
pub trait Updatable {
    fn update(&mut self, surface: &mut dyn DockSurface);
}

/// Capability: can ask its owner to remove it.
///
/// Once `should_be_removed` returns `true` it must keep returning `true`.
pub trait Removable {
    fn should_be_removed(&self) -> bool;
}

/// Capability: accepts drag and drop targeting.
///
/// The actual drop handling belongs to the render surface; this only marks
/// controls that may be targeted.
pub trait Droppable {
    fn accepts_drop(&self) -> bool {
        true
    }
}

/// Base trait for everything stored in a [`ControlCollection`](crate::ControlCollection).
pub trait Control: Updatable + Send {
    /// Get the control's name for debugging.
    fn debug_name(&self) -> &str {
        "Control"
    }

    /// Query if this control can request its own removal.
    fn as_removable(&self) -> Option<&dyn Removable> {
        None
    }

    /// Query if this control is a drop target.
    fn as_droppable(&self) -> Option<&dyn Droppable> {
        None
    }

    /// Query if this control is a dock panel.
    fn as_dock_panel(&self) -> Option<&dyn DockPanel> {
        None
    }

    /// Query if this control is a dock panel (mutable).
    fn as_dock_panel_mut(&mut self) -> Option<&mut dyn DockPanel> {
        None
    }
}

/// Capability: a panel that lives inside a docking region.
///
/// Dock managers only update children that expose this capability.
pub trait DockPanel: Control + Removable {
    fn title(&self) -> &str;
}

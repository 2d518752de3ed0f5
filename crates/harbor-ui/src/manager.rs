//! The dock host.
//!
//! A [`DockManager`] owns a set of dock panels and draws them inside one
//! full-window docking surface per frame:
//!
//! ```text
//! push padding(host)
//! begin full-window surface "<label>###<id>"
//!   [visible] push padding(region * scale)
//!   [visible] begin dock region
//!   [visible]   lock, update every dock panel, unlock
//!   [visible] end dock region
//!   [visible] pop padding
//! end surface
//! pop padding
//! ```
//!
//! Once the host's open flag goes false it stops touching the surface and
//! reports itself as removable, so whatever collection owns it can drop it.

use crate::capability::{Control, DockPanel, Droppable, Removable, Updatable};
use crate::collection::{ControlCollection, ControlId};
use crate::id::{DockId, IdAllocator};
use crate::scope::{DockRegionScope, SpacingScope, SurfaceScope};
use crate::style::DockStyle;
use crate::surface::{DockSurface, SpacingKind};
use harbor_core::profiling::{profile_function, profile_scope};

/// Lifecycle of a dock host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DockState {
    /// Drawn every frame.
    Open,
    /// Closed by its owner; the next update retires it.
    Closing,
    /// Retired. Terminal.
    Removed,
}

/// Full-window dock host owning a collection of dock panels.
#[derive(Debug)]
pub struct DockManager {
    label: String,
    identity: DockId,
    open: bool,
    should_be_removed: bool,
    controls: ControlCollection,
    style: DockStyle,
}

impl DockManager {
    /// Create a host with an id from the process-wide allocator.
    pub fn new() -> Self {
        Self::with_allocator(IdAllocator::global())
    }

    /// Create a host with an id from `allocator`.
    pub fn with_allocator(allocator: &IdAllocator) -> Self {
        Self {
            label: String::new(),
            identity: allocator.next(),
            open: true,
            should_be_removed: false,
            controls: ControlCollection::new(),
            style: DockStyle::default(),
        }
    }

    /// Set the label shown for this host.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the spacing used while drawing.
    pub fn with_style(mut self, style: DockStyle) -> Self {
        self.style = style;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn identity(&self) -> DockId {
        self.identity
    }

    /// Key of the host window in the surface's identity namespace.
    ///
    /// Changing the label keeps the identity, so surface state survives a rename.
    pub fn surface_key(&self) -> String {
        self.identity.key(&self.label)
    }

    pub fn style(&self) -> &DockStyle {
        &self.style
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Set the open flag.
    ///
    /// Reopening a host that already reported itself removed has no effect.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Request the host to close; it is retired on its next update.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn state(&self) -> DockState {
        if self.should_be_removed {
            DockState::Removed
        } else if !self.open {
            DockState::Closing
        } else {
            DockState::Open
        }
    }

    /// Hosted controls, in update order.
    pub fn controls(&self) -> &ControlCollection {
        &self.controls
    }

    /// Hosted controls (mutable), for adding and removing outside of an update.
    pub fn controls_mut(&mut self) -> &mut ControlCollection {
        &mut self.controls
    }

    /// Add a dock panel to the host.
    pub fn add_panel(&mut self, panel: impl DockPanel + 'static) -> ControlId {
        self.controls.add(Box::new(panel))
    }

    fn update_panels(&mut self, surface: &mut dyn DockSurface) {
        profile_scope!("dock_panels");
        let mut locked = self.controls.lock();
        locked.for_each(|control| {
            if let Some(panel) = control.as_dock_panel_mut() {
                panel.update(&mut *surface);
            }
        });
        let report = locked.unlock();
        if report.removed > 0 {
            tracing::debug!(
                key = %self.identity,
                removed = report.removed,
                remaining = report.remaining,
                "dock panels retired"
            );
        }
    }
}

impl Default for DockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Updatable for DockManager {
    fn update(&mut self, surface: &mut dyn DockSurface) {
        profile_function!();

        if self.should_be_removed {
            return;
        }
        if !self.open {
            self.should_be_removed = true;
            tracing::debug!(label = %self.label, id = %self.identity, "dock host closed");
            return;
        }

        let key = self.surface_key();
        let mut host = SpacingScope::push(
            surface,
            SpacingKind::WindowPadding,
            self.style.host_padding_vec(),
        );
        let mut window = SurfaceScope::begin(&mut *host, &key);
        if !window.is_visible() {
            tracing::trace!(%key, "dock host hidden");
            return;
        }

        let padding = self.style.region_padding_vec(window.display_scale_factor());
        let mut inner = SpacingScope::push(&mut *window, SpacingKind::WindowPadding, padding);
        let mut region = DockRegionScope::begin(&mut *inner);
        self.update_panels(&mut *region);
    }
}

impl Removable for DockManager {
    fn should_be_removed(&self) -> bool {
        self.should_be_removed
    }
}

impl Droppable for DockManager {}

impl Control for DockManager {
    fn debug_name(&self) -> &str {
        "DockManager"
    }

    fn as_removable(&self) -> Option<&dyn Removable> {
        Some(self)
    }

    fn as_droppable(&self) -> Option<&dyn Droppable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_core::math::Vec2;

    #[derive(Default)]
    struct Counter {
        begins: usize,
        ends: usize,
        visible: bool,
    }

    impl DockSurface for Counter {
        fn push_spacing(&mut self, _kind: SpacingKind, _value: Vec2) {
            self.begins += 1;
        }
        fn pop_spacing(&mut self) {
            self.ends += 1;
        }
        fn begin_full_window_surface(&mut self, _key: &str) -> bool {
            self.begins += 1;
            self.visible
        }
        fn end_surface(&mut self) {
            self.ends += 1;
        }
        fn begin_dock_region(&mut self) {
            self.begins += 1;
        }
        fn end_dock_region(&mut self) {
            self.ends += 1;
        }
        fn begin_panel(&mut self, _key: &str, _open: &mut bool) -> bool {
            self.begins += 1;
            self.visible
        }
        fn end_panel(&mut self) {
            self.ends += 1;
        }
        fn display_scale_factor(&self) -> f32 {
            1.0
        }
    }

    #[test]
    fn test_surface_key_uses_identity() {
        let allocator = IdAllocator::new(7);
        let mut manager = DockManager::with_allocator(&allocator).with_label("Scene");
        assert_eq!(manager.surface_key(), "Scene###7");

        manager.set_label("Viewport");
        assert_eq!(manager.surface_key(), "Viewport###7");
        assert_eq!(manager.identity(), DockId::from_raw(7));
    }

    #[test]
    fn test_state_transitions() {
        let mut surface = Counter {
            visible: true,
            ..Default::default()
        };
        let mut manager = DockManager::new();
        assert_eq!(manager.state(), DockState::Open);

        manager.update(&mut surface);
        assert_eq!(surface.begins, 4);
        assert_eq!(surface.ends, 4);

        manager.close();
        assert_eq!(manager.state(), DockState::Closing);
        manager.update(&mut surface);
        assert_eq!(manager.state(), DockState::Removed);
        assert!(manager.should_be_removed());

        manager.set_open(true);
        manager.update(&mut surface);
        assert_eq!(manager.state(), DockState::Removed);
        assert_eq!(surface.begins, 4);
    }

    #[test]
    fn test_manager_capabilities() {
        let manager = DockManager::new();
        let control: &dyn Control = &manager;
        assert!(control.as_removable().is_some());
        assert!(control.as_droppable().is_some());
        assert!(control.as_dock_panel().is_none());
    }
}

//! Trait abstracting the immediate mode layout engine.
//!
//! The dock manager never talks to a UI library directly. Everything it needs
//! from the engine goes through [`DockSurface`], which is implemented by the
//! egui backend in `harbor-egui` and by the recording mock in
//! `harbor-test-utils`.
//!
//! # Pairing
//!
//! Every `begin_*`/`push_*` call must be matched by its `end_*`/`pop_*`
//! counterpart, including `end_surface` and `end_panel` when the matching
//! begin reported the region as hidden. Code in this crate never calls these
//! methods bare; it goes through the guards in [`crate::scope`].

use harbor_core::math::Vec2;

/// Layout parameter adjusted by a spacing scope.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpacingKind {
    /// Inner padding of windows opened while the scope is active.
    WindowPadding,
}

/// The render surface a dock host draws into.
///
/// Object safe, so hosts and panels take `&mut dyn DockSurface` and stay
/// independent of the backend.
pub trait DockSurface {
    /// Push a layout parameter; reverted by the matching [`pop_spacing`](Self::pop_spacing).
    fn push_spacing(&mut self, kind: SpacingKind, value: Vec2);

    /// Revert the most recent [`push_spacing`](Self::push_spacing).
    fn pop_spacing(&mut self);

    /// Open a host window covering the whole viewport, keyed by `key`.
    ///
    /// Returns whether the window is visible this frame. [`end_surface`](Self::end_surface)
    /// must be called either way.
    fn begin_full_window_surface(&mut self, key: &str) -> bool;

    /// Close the window opened by [`begin_full_window_surface`](Self::begin_full_window_surface).
    fn end_surface(&mut self);

    /// Mark the current window's content area as a docking target.
    fn begin_dock_region(&mut self);

    /// Close the region opened by [`begin_dock_region`](Self::begin_dock_region).
    fn end_dock_region(&mut self);

    /// Open a dockable panel window keyed by `key`.
    ///
    /// The surface clears `open` when the user closes the panel. Returns
    /// whether the panel content is visible; [`end_panel`](Self::end_panel)
    /// must be called either way.
    fn begin_panel(&mut self, key: &str, open: &mut bool) -> bool;

    /// Close the panel opened by [`begin_panel`](Self::begin_panel).
    fn end_panel(&mut self);

    /// Scale factor of the display the surface is shown on (1.0 on standard DPI).
    fn display_scale_factor(&self) -> f32;
}

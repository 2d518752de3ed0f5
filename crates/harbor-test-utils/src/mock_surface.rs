//! Mock implementation of DockSurface for testing.
//!
//! This module provides a surface that records calls without drawing
//! anything, and lets tests script what the "engine" reports back.

use harbor_core::alloc::HashSet;
use harbor_core::math::Vec2;
use harbor_ui::{DockSurface, SpacingKind};
use std::collections::VecDeque;

/// Records a surface call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    PushSpacing { kind: SpacingKind, value: Vec2 },
    PopSpacing,
    BeginSurface { key: String, visible: bool },
    EndSurface,
    BeginDockRegion,
    EndDockRegion,
    BeginPanel { key: String, visible: bool },
    EndPanel,
}

impl SurfaceCall {
    /// Whether this call opens a scope that needs a matching close.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            SurfaceCall::PushSpacing { .. }
                | SurfaceCall::BeginSurface { .. }
                | SurfaceCall::BeginDockRegion
                | SurfaceCall::BeginPanel { .. }
        )
    }

    /// Whether this call closes a scope.
    pub fn is_close(&self) -> bool {
        !self.is_open()
    }
}

/// Kind of scope currently open on the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Spacing,
    Surface,
    DockRegion,
    Panel,
}

/// Mock implementation of DockSurface for testing.
///
/// # Scripting
///
/// - Surface visibility comes from [`queue_visibility`](Self::queue_visibility)
///   first, then falls back to [`set_visible`](Self::set_visible) (default `true`).
/// - [`close_panel`](Self::close_panel) makes the next `begin_panel` with that
///   key clear the panel's open flag, as if its close button was clicked.
///
/// # Example
///
/// ```rust
/// use harbor_test_utils::{MockDockSurface, SurfaceCall};
/// use harbor_ui::DockSurface;
///
/// let mut mock = MockDockSurface::new();
/// mock.queue_visibility([false]);
///
/// assert!(!mock.begin_full_window_surface("Editor###1"));
/// mock.end_surface();
///
/// assert!(mock.is_balanced());
/// assert_eq!(mock.calls()[1], SurfaceCall::EndSurface);
/// ```
pub struct MockDockSurface {
    /// Recorded calls for verification
    calls: Vec<SurfaceCall>,

    /// Currently open scopes, innermost last
    stack: Vec<Open>,
    max_depth: usize,

    visible: bool,
    scripted_visibility: VecDeque<bool>,
    panels_visible: bool,
    pending_closes: HashSet<String>,
    scale_factor: f32,
}

impl MockDockSurface {
    /// Create a new mock surface: visible, scale factor 1.0.
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            stack: Vec::new(),
            max_depth: 0,
            visible: true,
            scripted_visibility: VecDeque::new(),
            panels_visible: true,
            pending_closes: HashSet::new(),
            scale_factor: 1.0,
        }
    }

    /// Set the display scale factor reported to hosts.
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the visibility reported by unscripted surface begins.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Script the visibility of the next surface begins, in order.
    pub fn queue_visibility(&mut self, visibility: impl IntoIterator<Item = bool>) {
        self.scripted_visibility.extend(visibility);
    }

    /// Set the visibility reported by panel begins.
    pub fn set_panels_visible(&mut self, visible: bool) {
        self.panels_visible = visible;
    }

    /// Simulate the close button of the panel keyed `key` on its next begin.
    pub fn close_panel(&mut self, key: impl Into<String>) {
        self.pending_closes.insert(key.into());
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.clone()
    }

    /// Clear recorded calls (useful between frames).
    ///
    /// # Panics
    ///
    /// Panics if scopes are still open.
    pub fn clear_calls(&mut self) {
        assert!(self.stack.is_empty(), "clearing calls with open scopes");
        self.calls.clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Count calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Count full-window surface begins.
    pub fn count_surface_begins(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::BeginSurface { .. }))
    }

    /// Count full-window surface ends.
    pub fn count_surface_ends(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::EndSurface))
    }

    /// Count dock region begins.
    pub fn count_dock_regions(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::BeginDockRegion))
    }

    /// Count panel begins.
    pub fn count_panel_begins(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::BeginPanel { .. }))
    }

    /// Keys passed to surface begins, in order.
    pub fn surface_keys(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::BeginSurface { key, .. } => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of scopes currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Deepest nesting seen since creation.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// No open scopes, and as many closing calls as opening calls recorded.
    pub fn is_balanced(&self) -> bool {
        let opens = self.count(SurfaceCall::is_open);
        self.stack.is_empty() && opens * 2 == self.calls.len()
    }

    fn open(&mut self, scope: Open, call: SurfaceCall) {
        self.stack.push(scope);
        self.max_depth = self.max_depth.max(self.stack.len());
        self.calls.push(call);
    }

    fn close(&mut self, scope: Open, call: SurfaceCall) {
        let top = self.stack.pop();
        assert_eq!(
            top,
            Some(scope),
            "{:?} does not match the innermost open scope",
            call
        );
        self.calls.push(call);
    }
}

impl Default for MockDockSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DockSurface for MockDockSurface {
    fn push_spacing(&mut self, kind: SpacingKind, value: Vec2) {
        self.open(Open::Spacing, SurfaceCall::PushSpacing { kind, value });
    }

    fn pop_spacing(&mut self) {
        self.close(Open::Spacing, SurfaceCall::PopSpacing);
    }

    fn begin_full_window_surface(&mut self, key: &str) -> bool {
        let visible = self.scripted_visibility.pop_front().unwrap_or(self.visible);
        self.open(
            Open::Surface,
            SurfaceCall::BeginSurface {
                key: key.to_string(),
                visible,
            },
        );
        visible
    }

    fn end_surface(&mut self) {
        self.close(Open::Surface, SurfaceCall::EndSurface);
    }

    fn begin_dock_region(&mut self) {
        self.open(Open::DockRegion, SurfaceCall::BeginDockRegion);
    }

    fn end_dock_region(&mut self) {
        self.close(Open::DockRegion, SurfaceCall::EndDockRegion);
    }

    fn begin_panel(&mut self, key: &str, open: &mut bool) -> bool {
        if self.pending_closes.remove(key) {
            *open = false;
        }
        let visible = self.panels_visible;
        self.open(
            Open::Panel,
            SurfaceCall::BeginPanel {
                key: key.to_string(),
                visible,
            },
        );
        visible
    }

    fn end_panel(&mut self) {
        self.close(Open::Panel, SurfaceCall::EndPanel);
    }

    fn display_scale_factor(&self) -> f32 {
        self.scale_factor
    }
}

//! Egui backend for Harbor.
//!
//! [`EguiDockSurface`] implements [`DockSurface`] on top of an
//! [`egui::Context`] for the duration of one frame:
//!
//! - the full-window surface is a root [`egui::Ui`] covering the context's
//!   available rect, painted with the panel fill color;
//! - the dock region is a padded child `Ui`;
//! - panels are stacked child `Ui`s with a title row and a close button.
//!
//! Egui has no native docking, so panels are laid out top to bottom. Window
//! padding scopes are tracked on the surface and applied to the regions
//! opened while they are active.
//!
//! ```rust,no_run
//! use harbor_egui::EguiDockSurface;
//! use harbor_ui::{DockManager, Panel, Updatable};
//!
//! let ctx = egui::Context::default();
//! let mut dock = DockManager::new().with_label("Editor");
//! dock.add_panel(Panel::new("Scene"));
//!
//! let _output = ctx.run(egui::RawInput::default(), |ctx| {
//!     let mut surface = EguiDockSurface::new(ctx);
//!     dock.update(&mut surface);
//! });
//! ```

use harbor_core::math::Vec2;
use harbor_core::profiling::profile_function;
use harbor_ui::{DockSurface, SpacingKind};

// Re-export egui types
pub use egui::{self, Context as EguiContext, Ui};

/// Separator between a panel's displayed title and its identity suffix.
const ID_SEPARATOR: &str = "###";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegionKind {
    Surface,
    Dock,
    Panel,
}

/// An open region. `ui` is `None` when the region is hidden.
struct Region {
    kind: RegionKind,
    ui: Option<egui::Ui>,
}

/// Dock surface drawing into an egui context.
///
/// Create one per frame, inside `Context::run` (or between
/// `begin_pass`/`end_pass`).
pub struct EguiDockSurface {
    context: egui::Context,
    regions: Vec<Region>,
    window_padding: Vec<Vec2>,
    scale_factor: f32,
}

impl EguiDockSurface {
    pub fn new(context: &egui::Context) -> Self {
        Self {
            context: context.clone(),
            regions: Vec::new(),
            window_padding: Vec::new(),
            scale_factor: context.pixels_per_point(),
        }
    }

    /// Override the scale factor reported to dock hosts.
    ///
    /// Defaults to the context's `pixels_per_point`.
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Get the egui context for direct access.
    pub fn context(&self) -> &egui::Context {
        &self.context
    }

    /// The innermost visible region, for drawing panel content.
    pub fn current_ui(&mut self) -> Option<&mut egui::Ui> {
        self.regions.last_mut().and_then(|region| region.ui.as_mut())
    }

    /// Number of regions currently open.
    pub fn depth(&self) -> usize {
        self.regions.len()
    }

    /// No region or padding scope left open.
    pub fn is_balanced(&self) -> bool {
        self.regions.is_empty() && self.window_padding.is_empty()
    }

    fn current_window_padding(&self) -> egui::Vec2 {
        match self.window_padding.last() {
            Some(padding) => egui::vec2(padding.x, padding.y),
            None => {
                let margin = self.context.style().spacing.window_margin;
                egui::vec2(margin.left as f32, margin.top as f32)
            }
        }
    }

    fn open(&mut self, kind: RegionKind, ui: Option<egui::Ui>) {
        self.regions.push(Region { kind, ui });
    }

    fn close(&mut self, kind: RegionKind) -> Option<egui::Ui> {
        let region = self.regions.pop();
        assert!(
            matches!(&region, Some(region) if region.kind == kind),
            "end of {:?} region without a matching begin",
            kind
        );
        region.and_then(|region| region.ui)
    }

    /// Close a child region and reserve its space in the parent.
    fn close_child(&mut self, kind: RegionKind) -> Option<egui::Ui> {
        let child = self.close(kind)?;
        if let Some(parent) = self.current_ui() {
            parent.advance_cursor_after_rect(child.min_rect());
        }
        Some(child)
    }
}

impl DockSurface for EguiDockSurface {
    fn push_spacing(&mut self, kind: SpacingKind, value: Vec2) {
        match kind {
            SpacingKind::WindowPadding => self.window_padding.push(value),
        }
    }

    fn pop_spacing(&mut self) {
        assert!(
            self.window_padding.pop().is_some(),
            "pop_spacing without a matching push_spacing"
        );
    }

    fn begin_full_window_surface(&mut self, key: &str) -> bool {
        profile_function!();
        let rect = self.context.available_rect();
        let visible = rect.is_positive();

        let ui = visible.then(|| {
            let content = rect.shrink2(self.current_window_padding());
            let ui = egui::Ui::new(
                self.context.clone(),
                egui::Id::new(key),
                egui::UiBuilder::new().max_rect(content),
            );
            ui.painter()
                .rect_filled(rect, 0.0, ui.visuals().panel_fill);
            ui
        });

        self.open(RegionKind::Surface, ui);
        visible
    }

    fn end_surface(&mut self) {
        self.close(RegionKind::Surface);
    }

    fn begin_dock_region(&mut self) {
        let padding = self.current_window_padding();
        let ui = self.current_ui().map(|parent| {
            let rect = parent.available_rect_before_wrap().shrink2(padding);
            parent.new_child(
                egui::UiBuilder::new()
                    .id_salt("harbor_dock_region")
                    .max_rect(rect)
                    .layout(egui::Layout::top_down_justified(egui::Align::Min)),
            )
        });
        self.open(RegionKind::Dock, ui);
    }

    fn end_dock_region(&mut self) {
        self.close_child(RegionKind::Dock);
    }

    fn begin_panel(&mut self, key: &str, open: &mut bool) -> bool {
        let title = key.split(ID_SEPARATOR).next().unwrap_or(key);

        let Some(parent) = self.current_ui() else {
            self.open(RegionKind::Panel, None);
            return false;
        };

        let close_clicked = parent
            .push_id(key, |ui| {
                ui.horizontal(|ui| {
                    ui.strong(title);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small_button("✕").clicked()
                    })
                    .inner
                })
                .inner
            })
            .inner;
        if close_clicked {
            tracing::debug!(%key, "panel close requested");
            *open = false;
        }

        let visible = *open && parent.is_visible();
        let child = parent.new_child(
            egui::UiBuilder::new()
                .id_salt(key)
                .max_rect(parent.available_rect_before_wrap()),
        );
        self.open(RegionKind::Panel, Some(child));
        visible
    }

    fn end_panel(&mut self) {
        if self.close_child(RegionKind::Panel).is_some() {
            if let Some(parent) = self.current_ui() {
                parent.separator();
            }
        }
    }

    fn display_scale_factor(&self) -> f32 {
        self.scale_factor
    }
}

impl Drop for EguiDockSurface {
    fn drop(&mut self) {
        if !self.is_balanced() && !std::thread::panicking() {
            tracing::warn!(
                regions = self.regions.len(),
                padding_scopes = self.window_padding.len(),
                "egui dock surface dropped with open scopes"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_test_utils::{SpyPanel, UpdateLog};
    use harbor_ui::{DockManager, Panel, Removable, Updatable};

    /// Runs exactly one egui pass around `frame`.
    fn run_frame(ctx: &egui::Context, frame: impl FnOnce(&mut EguiDockSurface)) {
        ctx.begin_pass(egui::RawInput::default());
        let mut surface = EguiDockSurface::new(ctx);
        frame(&mut surface);
        assert!(surface.is_balanced());
        drop(surface);
        let _ = ctx.end_pass();
    }

    #[test]
    fn test_manager_updates_panels_through_egui() {
        let ctx = egui::Context::default();
        let log = UpdateLog::new();
        let mut dock = DockManager::new().with_label("Editor");
        dock.add_panel(SpyPanel::new("Scene", &log));
        dock.add_panel(SpyPanel::new("Inspector", &log).remove_after(1));

        run_frame(&ctx, |surface| dock.update(surface));
        run_frame(&ctx, |surface| dock.update(surface));

        assert_eq!(log.entries(), ["Scene", "Inspector", "Scene"]);
        assert_eq!(dock.controls().len(), 1);
    }

    #[test]
    fn test_panel_frame_leaves_surface_balanced() {
        let ctx = egui::Context::default();
        let mut dock = DockManager::new().with_label("Editor");
        dock.add_panel(Panel::new("Scene").with_content(|surface| {
            assert_eq!(surface.display_scale_factor(), 1.0);
        }));

        let mut depth_after = None;
        run_frame(&ctx, |surface| {
            dock.update(surface);
            depth_after = Some(surface.depth());
        });

        assert_eq!(depth_after, Some(0));
        assert!(!dock.should_be_removed());
        assert_eq!(dock.controls().len(), 1);
    }

    #[test]
    fn test_regions_nest_and_unwind() {
        let ctx = egui::Context::default();
        run_frame(&ctx, |surface| {
            surface.push_spacing(SpacingKind::WindowPadding, Vec2::ZERO);
            assert!(surface.begin_full_window_surface("Editor###1"));
            surface.begin_dock_region();
            let mut open = true;
            assert!(surface.begin_panel("Scene###2", &mut open));
            assert_eq!(surface.depth(), 3);
            assert!(surface.current_ui().is_some());
            surface.end_panel();
            surface.end_dock_region();
            surface.end_surface();
            surface.pop_spacing();
            assert!(open);
        });
    }

    #[test]
    fn test_scale_factor_override() {
        let ctx = egui::Context::default();
        let surface = EguiDockSurface::new(&ctx).with_scale_factor(2.0);
        assert_eq!(surface.display_scale_factor(), 2.0);
        assert!(surface.is_balanced());
    }

    #[test]
    #[should_panic(expected = "without a matching begin")]
    fn test_unmatched_end_panics() {
        let ctx = egui::Context::default();
        let mut surface = EguiDockSurface::new(&ctx);
        surface.end_surface();
    }
}

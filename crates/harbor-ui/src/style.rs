//! Padding configuration for dock hosts.

use harbor_core::math::Vec2;

/// Default padding between the host window edge and the docking region.
pub const DEFAULT_HOST_PADDING: f32 = 0.0;

/// Default padding applied to windows docked inside the region, before DPI scaling.
pub const DEFAULT_REGION_PADDING: f32 = 5.0;

/// Spacing used by a [`DockManager`](crate::DockManager) while it draws.
#[derive(Debug, Clone, PartialEq)]
pub struct DockStyle {
    /// Window padding of the full-window host surface.
    pub host_padding: f32,
    /// Window padding inside the docking region.
    pub region_padding: f32,
    /// Whether `region_padding` is multiplied by the display scale factor.
    pub scale_with_display: bool,
}

impl Default for DockStyle {
    fn default() -> Self {
        Self {
            host_padding: DEFAULT_HOST_PADDING,
            region_padding: DEFAULT_REGION_PADDING,
            scale_with_display: true,
        }
    }
}

impl DockStyle {
    /// Set the host window padding.
    pub fn host_padding(mut self, padding: f32) -> Self {
        self.host_padding = padding;
        self
    }

    /// Set the padding inside the docking region.
    pub fn region_padding(mut self, padding: f32) -> Self {
        self.region_padding = padding;
        self
    }

    /// Set whether region padding follows the display scale factor.
    pub fn scale_with_display(mut self, scale: bool) -> Self {
        self.scale_with_display = scale;
        self
    }

    pub(crate) fn host_padding_vec(&self) -> Vec2 {
        Vec2::splat(self.host_padding)
    }

    /// Region padding for a display with the given scale factor.
    pub fn region_padding_vec(&self, scale_factor: f32) -> Vec2 {
        if self.scale_with_display {
            Vec2::splat(self.region_padding * scale_factor)
        } else {
            Vec2::splat(self.region_padding)
        }
    }
}

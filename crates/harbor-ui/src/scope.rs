//! Guards that keep surface calls balanced.
//!
//! Each guard performs the opening call on construction and the closing call
//! on drop, so early returns and unwinding panics still leave the surface
//! stack balanced. Guards deref to the surface, which lets them nest:
//!
//! ```rust,ignore
//! let mut padding = SpacingScope::push(surface, SpacingKind::WindowPadding, Vec2::ZERO);
//! let window = SurfaceScope::begin(&mut *padding, "Scene###1");
//! if !window.is_visible() {
//!     return; // end_surface, then pop_spacing
//! }
//! ```

use crate::surface::{DockSurface, SpacingKind};
use harbor_core::math::Vec2;
use std::ops::{Deref, DerefMut};

macro_rules! deref_to_surface {
    ($guard:ident) => {
        impl<'a> Deref for $guard<'a> {
            type Target = dyn DockSurface + 'a;

            fn deref(&self) -> &Self::Target {
                &*self.surface
            }
        }

        impl<'a> DerefMut for $guard<'a> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut *self.surface
            }
        }
    };
}

/// A pushed layout parameter, popped on drop.
pub struct SpacingScope<'a> {
    surface: &'a mut dyn DockSurface,
}

impl<'a> SpacingScope<'a> {
    pub fn push(surface: &'a mut dyn DockSurface, kind: SpacingKind, value: Vec2) -> Self {
        surface.push_spacing(kind, value);
        Self { surface }
    }
}

impl Drop for SpacingScope<'_> {
    fn drop(&mut self) {
        self.surface.pop_spacing();
    }
}

deref_to_surface!(SpacingScope);

/// An open full-window surface, ended on drop whether or not it was visible.
pub struct SurfaceScope<'a> {
    surface: &'a mut dyn DockSurface,
    visible: bool,
}

impl<'a> SurfaceScope<'a> {
    pub fn begin(surface: &'a mut dyn DockSurface, key: &str) -> Self {
        let visible = surface.begin_full_window_surface(key);
        Self { surface, visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Drop for SurfaceScope<'_> {
    fn drop(&mut self) {
        self.surface.end_surface();
    }
}

deref_to_surface!(SurfaceScope);

/// An open docking region, ended on drop.
pub struct DockRegionScope<'a> {
    surface: &'a mut dyn DockSurface,
}

impl<'a> DockRegionScope<'a> {
    pub fn begin(surface: &'a mut dyn DockSurface) -> Self {
        surface.begin_dock_region();
        Self { surface }
    }
}

impl Drop for DockRegionScope<'_> {
    fn drop(&mut self) {
        self.surface.end_dock_region();
    }
}

deref_to_surface!(DockRegionScope);

/// An open panel window, ended on drop whether or not it was visible.
pub struct PanelScope<'a> {
    surface: &'a mut dyn DockSurface,
    visible: bool,
}

impl<'a> PanelScope<'a> {
    pub fn begin(surface: &'a mut dyn DockSurface, key: &str, open: &mut bool) -> Self {
        let visible = surface.begin_panel(key, open);
        Self { surface, visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Drop for PanelScope<'_> {
    fn drop(&mut self) {
        self.surface.end_panel();
    }
}

deref_to_surface!(PanelScope);

//! A closable dock panel.

use crate::capability::{Control, DockPanel, Droppable, Removable, Updatable};
use crate::id::{DockId, IdAllocator};
use crate::scope::PanelScope;
use crate::surface::DockSurface;
use harbor_core::profiling::profile_function;
use std::fmt;

/// Draws the inside of a panel. Only called while the panel is visible.
pub type PanelContent = Box<dyn FnMut(&mut dyn DockSurface) + Send>;

/// Dock panel with a close button.
///
/// When the surface clears the panel's open flag, the panel reports itself
/// as removable at the end of that same update, and the hosting
/// [`DockManager`](crate::DockManager) drops it when it unlocks its
/// collection.
pub struct Panel {
    title: String,
    identity: DockId,
    open: bool,
    should_be_removed: bool,
    content: Option<PanelContent>,
}

impl Panel {
    /// Create a panel with an id from the process-wide allocator.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_allocator(title, IdAllocator::global())
    }

    /// Create a panel with an id from `allocator`.
    pub fn with_allocator(title: impl Into<String>, allocator: &IdAllocator) -> Self {
        Self {
            title: title.into(),
            identity: allocator.next(),
            open: true,
            should_be_removed: false,
            content: None,
        }
    }

    /// Set the callback drawing the panel body.
    pub fn with_content(mut self, content: impl FnMut(&mut dyn DockSurface) + Send + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    pub fn identity(&self) -> DockId {
        self.identity
    }

    pub fn surface_key(&self) -> String {
        self.identity.key(&self.title)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Request the panel to close; it is retired on its next update.
    pub fn close(&mut self) {
        self.open = false;
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("title", &self.title)
            .field("identity", &self.identity)
            .field("open", &self.open)
            .field("should_be_removed", &self.should_be_removed)
            .field("has_content", &self.content.is_some())
            .finish()
    }
}

impl Updatable for Panel {
    fn update(&mut self, surface: &mut dyn DockSurface) {
        profile_function!();

        if self.should_be_removed {
            return;
        }
        if !self.open {
            self.should_be_removed = true;
            return;
        }

        let key = self.surface_key();
        {
            let mut window = PanelScope::begin(surface, &key, &mut self.open);
            if window.is_visible() {
                if let Some(content) = self.content.as_mut() {
                    content(&mut *window);
                }
            }
        }

        // Closed through the surface this frame.
        if !self.open {
            tracing::debug!(%key, "dock panel closed");
            self.should_be_removed = true;
        }
    }
}

impl Removable for Panel {
    fn should_be_removed(&self) -> bool {
        self.should_be_removed
    }
}

impl Droppable for Panel {}

impl Control for Panel {
    fn debug_name(&self) -> &str {
        &self.title
    }

    fn as_removable(&self) -> Option<&dyn Removable> {
        Some(self)
    }

    fn as_droppable(&self) -> Option<&dyn Droppable> {
        Some(self)
    }

    fn as_dock_panel(&self) -> Option<&dyn DockPanel> {
        Some(self)
    }

    fn as_dock_panel_mut(&mut self) -> Option<&mut dyn DockPanel> {
        Some(self)
    }
}

impl DockPanel for Panel {
    fn title(&self) -> &str {
        &self.title
    }
}

//! Controls that record their updates.

use harbor_ui::{Control, DockPanel, DockSurface, Droppable, Removable, Updatable};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared, ordered log of control updates.
///
/// Clones share the same log, so a test can keep one while the controls
/// holding the others are owned by the collection under test.
#[derive(Debug, Clone, Default)]
pub struct UpdateLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.entries.lock().push(name.to_string());
    }

    /// Get a copy of all recorded updates.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Take the recorded updates, leaving the log empty.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.entries.lock())
    }

    /// Count updates recorded for `name`.
    pub fn count(&self, name: &str) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.as_str() == name)
            .count()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// Dock panel that logs each update and can retire itself.
#[derive(Debug)]
pub struct SpyPanel {
    name: String,
    log: UpdateLog,
    updates: usize,
    remove_after: Option<usize>,
    removed: bool,
}

impl SpyPanel {
    pub fn new(name: impl Into<String>, log: &UpdateLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            updates: 0,
            remove_after: None,
            removed: false,
        }
    }

    /// Flag removal during the `n`th update.
    pub fn remove_after(mut self, n: usize) -> Self {
        self.remove_after = Some(n);
        self
    }
}

impl Updatable for SpyPanel {
    fn update(&mut self, _surface: &mut dyn DockSurface) {
        self.log.record(&self.name);
        self.updates += 1;
        if self.remove_after.is_some_and(|n| self.updates >= n) {
            self.removed = true;
        }
    }
}

impl Removable for SpyPanel {
    fn should_be_removed(&self) -> bool {
        self.removed
    }
}

impl Droppable for SpyPanel {}

impl Control for SpyPanel {
    fn debug_name(&self) -> &str {
        &self.name
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

impl DockPanel for SpyPanel {
    fn title(&self) -> &str {
        &self.name
    }
}

/// Control without any capabilities, logging its updates.
///
/// Dock managers only update dock panels, so this one should never show up
/// in the log when hosted by a manager.
#[derive(Debug)]
pub struct SpyControl {
    name: String,
    log: UpdateLog,
}

impl SpyControl {
    pub fn new(name: impl Into<String>, log: &UpdateLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
        }
    }
}

impl Updatable for SpyControl {
    fn update(&mut self, _surface: &mut dyn DockSurface) {
        self.log.record(&self.name);
    }
}

impl Control for SpyControl {
    fn debug_name(&self) -> &str {
        &self.name
    }
}

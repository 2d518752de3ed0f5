//! Ordered control storage with deferred removal.
//!
//! Controls are updated while the collection is being iterated, and an
//! update is exactly when a panel decides to close itself. Removing it on
//! the spot would shift every later element under the iterator, so the
//! collection splits a frame into three phases:
//!
//! 1. [`ControlCollection::lock`] hands out a [`LockedControls`] guard. The
//!    guard mutably borrows the collection, so `add`/`remove` cannot be
//!    called until it is gone.
//! 2. [`LockedControls::for_each`] visits every control in insertion order.
//!    Controls flag themselves through [`Removable`]; other code can queue
//!    removals and additions on the guard.
//! 3. [`LockedControls::unlock`] (or dropping the guard) applies the queued
//!    changes in one batch: flagged and queued controls are dropped,
//!    survivors keep their relative order, queued additions are appended.
//!
//! ```rust,ignore
//! let mut locked = controls.lock();
//! locked.for_each(|control| control.update(surface));
//! let report = locked.unlock();
//! tracing::trace!(removed = report.removed, "frame done");
//! ```

use crate::capability::{Control, Removable};
use crate::error::{CollectionError, CollectionResult};
use harbor_core::alloc::HashSet;
use std::fmt;

/// Handle to a control stored in a [`ControlCollection`].
///
/// Handles are issued by the collection and never reused within it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(u64);

impl ControlId {
    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlId({})", self.0)
    }
}

struct Slot {
    id: ControlId,
    control: Box<dyn Control>,
}

impl Slot {
    fn is_flagged(&self) -> bool {
        self.control
            .as_removable()
            .is_some_and(|removable| removable.should_be_removed())
    }
}

/// Summary of the structural changes applied by [`LockedControls::unlock`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnlockReport {
    /// Controls dropped from the collection.
    pub removed: usize,
    /// Queued controls appended to the collection.
    pub added: usize,
    /// Controls in the collection after the unlock.
    pub remaining: usize,
}

/// Ordered, mutation-guarded sequence of child controls.
#[derive(Default)]
pub struct ControlCollection {
    items: Vec<Slot>,
    locked: bool,
    next_id: u64,
    pending_removals: HashSet<ControlId>,
    pending_adds: Vec<Slot>,
}

impl ControlCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_id(&mut self) -> ControlId {
        let id = ControlId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a control and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if the collection is locked, which can only happen if a
    /// [`LockedControls`] guard was leaked.
    pub fn add(&mut self, control: Box<dyn Control>) -> ControlId {
        assert!(
            !self.locked,
            "structural mutation of a locked control collection"
        );
        let id = self.issue_id();
        tracing::trace!(%id, name = control.debug_name(), "control added");
        self.items.push(Slot { id, control });
        id
    }

    /// Remove a control immediately and hand it back to the caller.
    pub fn remove(&mut self, id: ControlId) -> CollectionResult<Box<dyn Control>> {
        if self.locked {
            return Err(CollectionError::AlreadyLocked);
        }
        let index = self
            .items
            .iter()
            .position(|slot| slot.id == id)
            .ok_or(CollectionError::NotFound { id })?;
        Ok(self.items.remove(index).control)
    }

    /// Number of controls in the collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if an iteration pass holds the lock.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Check if a control with this id is stored.
    pub fn contains(&self, id: ControlId) -> bool {
        self.items.iter().any(|slot| slot.id == id)
    }

    /// Find a control by ID.
    pub fn get(&self, id: ControlId) -> Option<&dyn Control> {
        self.items
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| &*slot.control)
    }

    /// Find a control by ID (mutable).
    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut dyn Control> {
        self.items
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut *slot.control as &mut dyn Control)
    }

    /// Iterate over the controls in update order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Control + 'static)> + '_ {
        self.items.iter().map(|slot| &*slot.control)
    }

    /// Handles of all controls in update order.
    pub fn ids(&self) -> Vec<ControlId> {
        self.items.iter().map(|slot| slot.id).collect()
    }

    /// Start an iteration pass.
    ///
    /// # Panics
    ///
    /// Panics if the collection is already locked. Use [`try_lock`](Self::try_lock)
    /// to get an error instead.
    pub fn lock(&mut self) -> LockedControls<'_> {
        match self.try_lock() {
            Ok(locked) => locked,
            Err(err) => panic!("{}", err),
        }
    }

    /// Start an iteration pass, failing if one is already in progress.
    pub fn try_lock(&mut self) -> CollectionResult<LockedControls<'_>> {
        if self.locked {
            return Err(CollectionError::AlreadyLocked);
        }
        self.locked = true;
        Ok(LockedControls {
            collection: self,
            finished: false,
        })
    }
}

impl fmt::Debug for ControlCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlCollection")
            .field(
                "items",
                &self
                    .items
                    .iter()
                    .map(|slot| (slot.id, slot.control.debug_name()))
                    .collect::<Vec<_>>(),
            )
            .field("locked", &self.locked)
            .field("pending_removals", &self.pending_removals.len())
            .field("pending_adds", &self.pending_adds.len())
            .finish()
    }
}

/// A control collection in the middle of an iteration pass.
///
/// Structural changes requested through the guard are applied when it is
/// unlocked or dropped, never while it is alive.
pub struct LockedControls<'a> {
    collection: &'a mut ControlCollection,
    finished: bool,
}

impl LockedControls<'_> {
    /// Number of controls, unchanged by removals requested during the pass.
    pub fn len(&self) -> usize {
        self.collection.items.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.collection.items.is_empty()
    }

    /// Visit every control in insertion order.
    ///
    /// Controls queued with [`queue_add`](Self::queue_add) are not visited
    /// until the next pass.
    pub fn for_each(&mut self, mut visit: impl FnMut(&mut dyn Control)) {
        for slot in self.collection.items.iter_mut() {
            visit(slot.control.as_mut());
        }
    }

    /// Queue a control for removal at unlock.
    ///
    /// A control that was itself queued during this pass is dropped from the
    /// queue instead.
    pub fn queue_remove(&mut self, id: ControlId) -> CollectionResult<()> {
        let collection = &mut *self.collection;
        if let Some(index) = collection.pending_adds.iter().position(|slot| slot.id == id) {
            collection.pending_adds.remove(index);
            return Ok(());
        }
        if !collection.items.iter().any(|slot| slot.id == id) {
            return Err(CollectionError::NotFound { id });
        }
        collection.pending_removals.insert(id);
        Ok(())
    }

    /// Queue a control to be appended at unlock, returning its future handle.
    pub fn queue_add(&mut self, control: Box<dyn Control>) -> ControlId {
        let id = self.collection.issue_id();
        self.collection.pending_adds.push(Slot { id, control });
        id
    }

    /// Number of controls that unlocking would remove right now.
    pub fn pending_removals(&self) -> usize {
        let collection = &*self.collection;
        collection
            .items
            .iter()
            .filter(|slot| collection.pending_removals.contains(&slot.id) || slot.is_flagged())
            .count()
    }

    /// End the pass and apply the queued changes.
    pub fn unlock(mut self) -> UnlockReport {
        let report = self.apply();
        self.finished = true;
        report
    }

    fn apply(&mut self) -> UnlockReport {
        let collection = &mut *self.collection;
        collection.locked = false;

        let queued = std::mem::take(&mut collection.pending_removals);
        let before = collection.items.len();
        collection.items.retain(|slot| {
            let retire = queued.contains(&slot.id) || slot.is_flagged();
            if retire {
                tracing::trace!(id = %slot.id, name = slot.control.debug_name(), "control retired");
            }
            !retire
        });
        let removed = before - collection.items.len();

        let added = collection.pending_adds.len();
        collection.items.append(&mut collection.pending_adds);

        UnlockReport {
            removed,
            added,
            remaining: collection.items.len(),
        }
    }
}

impl Drop for LockedControls<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.apply();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Updatable;
    use crate::surface::DockSurface;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// A control whose removal flag is shared with the test.
    struct Flagged {
        name: &'static str,
        remove: Arc<AtomicBool>,
    }

    impl Flagged {
        fn boxed(name: &'static str) -> (Box<dyn Control>, Arc<AtomicBool>) {
            let remove = Arc::new(AtomicBool::new(false));
            let control = Box::new(Self {
                name,
                remove: Arc::clone(&remove),
            });
            (control, remove)
        }
    }

    impl Updatable for Flagged {
        fn update(&mut self, _surface: &mut dyn DockSurface) {}
    }

    impl Removable for Flagged {
        fn should_be_removed(&self) -> bool {
            self.remove.load(Ordering::Relaxed)
        }
    }

    impl Control for Flagged {
        fn debug_name(&self) -> &str {
            self.name
        }

        fn as_removable(&self) -> Option<&dyn Removable> {
            Some(self)
        }
    }

    fn names(collection: &ControlCollection) -> Vec<&str> {
        collection.iter().map(|c| c.debug_name()).collect()
    }

    #[test]
    fn test_add_and_remove_outside_pass() {
        let mut collection = ControlCollection::new();
        let (a, _) = Flagged::boxed("a");
        let (b, _) = Flagged::boxed("b");
        let a = collection.add(a);
        let b = collection.add(b);
        assert_ne!(a, b);
        assert_eq!(collection.len(), 2);

        let removed = collection.remove(a).unwrap();
        assert_eq!(removed.debug_name(), "a");
        assert_eq!(names(&collection), ["b"]);
        assert_eq!(
            collection.remove(a).err(),
            Some(CollectionError::NotFound { id: a })
        );
        assert!(collection.contains(b));
    }

    #[test]
    fn test_flagged_removal_is_deferred() {
        let mut collection = ControlCollection::new();
        let (a, _) = Flagged::boxed("a");
        let (b, flag_b) = Flagged::boxed("b");
        let (c, _) = Flagged::boxed("c");
        collection.add(a);
        collection.add(b);
        collection.add(c);

        let mut locked = collection.lock();
        let mut visited = Vec::new();
        locked.for_each(|control| {
            visited.push(control.debug_name().to_string());
            if control.debug_name() == "b" {
                flag_b.store(true, Ordering::Relaxed);
            }
        });
        assert_eq!(visited, ["a", "b", "c"]);
        assert_eq!(locked.len(), 3);
        assert_eq!(locked.pending_removals(), 1);

        let report = locked.unlock();
        assert_eq!(
            report,
            UnlockReport {
                removed: 1,
                added: 0,
                remaining: 2
            }
        );
        assert_eq!(names(&collection), ["a", "c"]);
        assert!(!collection.is_locked());
    }

    #[test]
    fn test_survivor_order_preserved() {
        let mut collection = ControlCollection::new();
        let labels = ["a", "b", "c", "d", "e", "f"];
        let flags: Vec<_> = labels
            .iter()
            .map(|name| {
                let (control, flag) = Flagged::boxed(name);
                collection.add(control);
                flag
            })
            .collect();

        for index in [0, 2, 5] {
            flags[index].store(true, Ordering::Relaxed);
        }
        collection.lock().unlock();
        assert_eq!(names(&collection), ["b", "d", "e"]);
    }

    #[test]
    fn test_drop_applies_removals() {
        let mut collection = ControlCollection::new();
        let (a, flag) = Flagged::boxed("a");
        collection.add(a);
        flag.store(true, Ordering::Relaxed);
        {
            let _locked = collection.lock();
        }
        assert!(collection.is_empty());
    }

    #[test]
    fn test_queued_mutation() {
        let mut collection = ControlCollection::new();
        let (a, _) = Flagged::boxed("a");
        let (b, _) = Flagged::boxed("b");
        let a = collection.add(a);
        collection.add(b);

        let mut locked = collection.lock();
        locked.queue_remove(a).unwrap();
        let (c, _) = Flagged::boxed("c");
        let c = locked.queue_add(c);
        let (d, _) = Flagged::boxed("d");
        let d = locked.queue_add(d);
        locked.queue_remove(d).unwrap();

        let mut visited = 0;
        locked.for_each(|_| visited += 1);
        assert_eq!(visited, 2);

        let report = locked.unlock();
        assert_eq!(report.removed, 1);
        assert_eq!(report.added, 1);
        assert_eq!(names(&collection), ["b", "c"]);
        assert!(collection.contains(c));
        assert!(!collection.contains(d));
    }

    #[test]
    fn test_queue_remove_unknown() {
        let mut collection = ControlCollection::new();
        let (a, _) = Flagged::boxed("a");
        let a = collection.add(a);
        collection.remove(a).unwrap();

        let mut locked = collection.lock();
        assert_eq!(
            locked.queue_remove(a),
            Err(CollectionError::NotFound { id: a })
        );
    }

    #[test]
    fn test_leaked_lock_is_reported() {
        let mut collection = ControlCollection::new();
        std::mem::forget(collection.lock());
        assert!(collection.is_locked());
        assert!(matches!(
            collection.try_lock(),
            Err(CollectionError::AlreadyLocked)
        ));
        assert_eq!(
            collection.remove(ControlId(0)).err(),
            Some(CollectionError::AlreadyLocked)
        );
    }

    #[test]
    #[should_panic(expected = "already locked")]
    fn test_reentrant_lock_panics() {
        let mut collection = ControlCollection::new();
        std::mem::forget(collection.lock());
        let _ = collection.lock();
    }
}

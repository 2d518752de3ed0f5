//! Process-wide unique identifiers for dock hosts and panels.
//!
//! Immediate mode surfaces key their persistent state by string. Two hosts
//! labelled "Scene" would share that state, so every host carries a
//! [`DockId`] that is appended to its label. Ids are never recycled, even
//! after the host is gone.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// First value handed out by a freshly created allocator.
pub const BASE_ID: u64 = 1;

static GLOBAL: IdAllocator = IdAllocator::new(BASE_ID);

/// Identity token of a dock host or panel.
///
/// Formats as `###<n>`, the suffix immediate mode libraries use to separate
/// the displayed label from the identity hash.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DockId(u64);

impl DockId {
    /// Create an id from a raw value.
    ///
    /// Ids created this way bypass the allocator and are not guaranteed to be unique.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Build the surface key for `label`.
    pub fn key(&self, label: &str) -> String {
        format!("{label}{self}")
    }
}

impl fmt::Display for DockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "###{}", self.0)
    }
}

/// Monotonic id source.
///
/// `next` is a single atomic increment, so hosts can be constructed from any
/// thread. Wrapping at `u64::MAX` is not a practical concern.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator whose first id is `base`.
    pub const fn new(base: u64) -> Self {
        Self {
            next: AtomicU64::new(base),
        }
    }

    /// The allocator shared by the whole process.
    pub fn global() -> &'static IdAllocator {
        &GLOBAL
    }

    /// Issue the next id.
    pub fn next(&self) -> DockId {
        DockId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The id the next call to [`IdAllocator::next`] will return.
    pub fn peek(&self) -> DockId {
        DockId(self.next.load(Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(BASE_ID)
    }
}

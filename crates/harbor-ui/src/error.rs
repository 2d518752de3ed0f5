//! Error types for the control collection.

use crate::collection::ControlId;
use std::fmt;

/// Errors reported by [`ControlCollection`](crate::ControlCollection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// The collection is already locked by an iteration pass.
    AlreadyLocked,

    /// No control with this id is in the collection.
    NotFound {
        /// The id that was looked up.
        id: ControlId,
    },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::AlreadyLocked => {
                write!(f, "Control collection is already locked")
            }
            CollectionError::NotFound { id } => {
                write!(f, "Control not found: {}", id)
            }
        }
    }
}

impl std::error::Error for CollectionError {}

/// Result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

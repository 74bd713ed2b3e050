//! Error taxonomy for the library store. Every failure here is meant to end
//! up as a footer message in the UI, never as a process abort, so the
//! variants carry ready-to-display detail.

use thiserror::Error;

/// Failures the store and its callers distinguish between. Load and save
/// failures keep the in-memory collection exactly as it was; validation
/// failures reject the draft before any mutation happens.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The persisted file exists but could not be read or parsed. The
    /// previous in-memory collection is left untouched.
    #[error("failed to load library: {reason}")]
    LoadFailed { reason: String },

    /// Writing the persisted file failed. The in-memory collection already
    /// reflects the mutation and is not rolled back.
    #[error("failed to save library: {reason}")]
    SaveFailed { reason: String },

    /// A draft was rejected before mutation (blank field or non-digit year).
    #[error("{reason}")]
    ValidationFailed { reason: String },

    /// A removal named a position outside the collection. Nothing changed.
    #[error("no book at position {index} (library holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

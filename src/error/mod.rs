//! Error definitions
//!
//! This module provides error types for test-waiters.

use thiserror::Error;

/// Main error type for test-waiters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `end_async` was called for an item that is not pending.
    ///
    /// This always points at a begin/end mismatch in the calling code.
    #[error("end_async called for {item} on waiter \"{waiter}\" but item is not currently pending")]
    UnmatchedEnd {
        /// Name of the waiter the call was made on.
        waiter: String,
        /// `Debug` rendering of the offending item.
        item: String,
    },
}

impl Error {
    /// Create an unmatched end error.
    #[must_use]
    pub fn unmatched_end(waiter: impl Into<String>, item: impl Into<String>) -> Self {
        Self::UnmatchedEnd {
            waiter: waiter.into(),
            item: item.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for sift
//!
//! Search itself never fails: empty or unmatched queries produce empty
//! result sets. Errors come from store mutations, configuration loading,
//! window construction and capacity-limited index rebuilds.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::RecordId;
use std::io;
use thiserror::Error;

/// Result type alias for sift operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sift
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (config file access)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Caller supplied an unusable value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No record with this id exists in the store
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// Every record id has been handed out
    #[error("Record id space exhausted")]
    IdSpaceExhausted,

    /// An index rebuild would exceed the configured posting budget
    #[error("Index capacity exceeded: {postings} postings (max {max})")]
    IndexCapacity {
        /// Postings inserted when the budget ran out
        postings: usize,
        /// Configured maximum
        max: usize,
    },

    /// Configuration file could not be parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an `InvalidInput` error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Build a `Config` error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

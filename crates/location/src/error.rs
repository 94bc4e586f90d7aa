//! Location Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A location error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for location operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A base location was configured as an empty string.
    #[display("base location is empty")]
    EmptyBase,
    /// The track references a root folder that is not configured.
    #[display("unknown root folder: {_0}")]
    UnknownRootFolder(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Both are configuration problems; the same input fails the same way.
        false
    }
}

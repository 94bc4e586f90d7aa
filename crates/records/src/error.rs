//! Record Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A record error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for record operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A serialized column did not hold the structure the query promises.
    /// The storage layer is corrupt or the query changed; never mask it.
    #[display("invalid serialized column: {_0}")]
    InvalidColumn(#[error(not(source))] &'static str),
    /// A timestamp could not be reduced to a date.
    #[display("invalid timestamp: {_0}")]
    InvalidTimestamp(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Rows are decoded deterministically; the same row fails the same way.
        false
    }
}

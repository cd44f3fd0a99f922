//! Error types for store operations.

use thiserror::Error;

/// Errors raised by [`Store`](crate::Store) dispatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error(
        "Invalid arguments to update(): it must be called with a mapping, a function, \
         or a key/value pair ({reason})"
    )]
    InvalidUpdateArguments { reason: &'static str },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

//! # Stream Errors
//!
//! Failures a stream accessor can report. Only misuse is an error here:
//! numeric edge cases (division by zero in an accelerator, `sqrt` of a
//! negative number) flow through streams as IEEE special values, and strict
//! consumption of an infinite stream simply never returns.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = StreamError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// `head`, `tail` or `at` reached past the end of a finite stream.
    #[error("cannot take the {operation} of an empty stream")]
    EmptyStreamAccess { operation: &'static str },

    /// A thunk was forced while its own computation was still running,
    /// or after that computation panicked.
    #[error("thunk forced while its own computation was in progress")]
    ReentrantForce,

    /// A deferred stream was forced before anything was bound to it.
    #[error("deferred stream forced before it was bound")]
    UnboundReference,

    #[error("deferred stream is already bound")]
    AlreadyBound,
}

impl StreamError {
    pub(crate) const fn empty(operation: &'static str) -> Self {
        StreamError::EmptyStreamAccess { operation }
    }
}

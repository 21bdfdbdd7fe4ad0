//! Error types for Ghostsh
//!
//! Every public store and terminal operation returns a discriminated
//! success-or-error value; nothing here is meant to abort a request.
//! Messages are safe to hand to the client verbatim — they carry the
//! sandbox-relative path at most, never a host path.

use thiserror::Error;

/// Result type alias using Ghostsh's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Ghostsh error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A client-supplied path resolved outside the sandbox root.
    ///
    /// This is the single security boundary of the system. It is never
    /// retried and the resolver logs the attempt before returning it.
    #[error("Access denied")]
    AccessDenied,

    /// The target does not exist. Reported, not fatal.
    #[error("{0} not found")]
    NotFound(String),

    /// The operation expected a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// The operation expected a file.
    #[error("Is a directory: {0}")]
    IsADirectory(String),

    /// A move/copy destination is a non-empty directory.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Malformed terminal command arguments; carries the expected usage.
    #[error("Usage: {0}")]
    Usage(String),

    /// Underlying I/O failure, original message preserved for diagnostics.
    #[error("{0}")]
    Storage(#[from] std::io::Error),
}

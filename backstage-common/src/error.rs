//! Common error types for Backstage

use thiserror::Error;

/// Common result type for Backstage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the ambient layer (configuration files, user input).
///
/// Persistence of dashboard state never surfaces these to callers; see
/// [`crate::persistence`]. Sync failures have their own type,
/// [`crate::sync::SyncError`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

//! Path-related error types.

use thiserror::Error;

/// Errors that can occur while resolving user-supplied search paths.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the user's home directory.
    #[error("Cannot determine home directory")]
    NoHomeDir,

    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,

    /// A relative path was provided where an absolute one is required.
    #[error("Search path must be absolute: {0}")]
    NotAbsolute(String),
}

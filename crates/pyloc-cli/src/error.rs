//! CLI-specific error types and mappings.
//!
//! This module maps core errors to exit codes and user-facing messages.

use pyloc_core::{CacheStoreError, LocatorError, PathError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Discovery failed as a whole.
    #[error("{0}")]
    Discovery(String),

    /// Invalid settings, flags or settings file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted snapshot storage failed.
    #[error("Cache error: {0}")]
    Cache(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions (see sysexits.h).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Discovery(_) => 1,
            Self::Cache(_) => 74, // EX_IOERR
            Self::Config(_) => 78,              // EX_CONFIG
        }
    }
}

impl From<LocatorError> for CliError {
    fn from(err: LocatorError) -> Self {
        Self::Discovery(err.to_string())
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<CacheStoreError> for CliError {
    fn from(err: CacheStoreError) -> Self {
        Self::Cache(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Discovery("x".into()).exit_code(), 1);
        assert_eq!(CliError::Cache("x".into()).exit_code(), 74);
        assert_eq!(CliError::Config("x".into()).exit_code(), 78);
    }

    #[test]
    fn test_core_error_mapping() {
        let err: CliError = LocatorError::Disposed {
            locator: "known-paths".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Discovery(_)));

        let err: CliError = SettingsError::InvalidConcurrency(0).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("between 1 and 256"));

        let err: CliError = PathError::EmptyPath.into();
        assert!(matches!(err, CliError::Config(_)));

        let err: CliError = CacheStoreError::Io("disk full".to_string()).into();
        assert_eq!(err.to_string(), "Cache error: Cache storage error: disk full");
    }
}

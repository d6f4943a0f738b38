//! Version provider port.
//!
//! Implementations perform the raw version query for an executable (usually
//! by running it out of process). Timeouts, concurrency limits and fallback
//! labels are applied by [`crate::services::VersionResolver`].

use async_trait::async_trait;
use std::path::Path;

use super::VersionError;

/// Queries an interpreter executable for its version string.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionProvider: Send + Sync {
    /// Return the version text reported by `executable`, e.g. `"Python 3.10.4"`.
    ///
    /// Implementations must release any child process when the returned
    /// future is dropped, since the caller may abandon it on timeout.
    async fn get_version(&self, executable: &Path) -> Result<String, VersionError>;
}

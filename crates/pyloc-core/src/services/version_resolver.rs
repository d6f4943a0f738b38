//! Version resolution with per-query isolation.
//!
//! Every query runs under its own timeout and behind a shared concurrency
//! cap. Failures of any kind collapse to the caller's fallback label, so one
//! broken interpreter never affects the others.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::ports::{VersionError, VersionProvider};
use crate::settings::DiscoverySettings;

/// Resolves display names for interpreter executables.
pub struct VersionResolver {
    provider: Arc<dyn VersionProvider>,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl VersionResolver {
    /// Create a resolver.
    ///
    /// `max_concurrent` is clamped to at least one.
    pub fn new(provider: Arc<dyn VersionProvider>, timeout: Duration, max_concurrent: usize) -> Self {
        Self {
            provider,
            timeout,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Create a resolver using the timeout and concurrency cap from settings.
    pub fn from_settings(provider: Arc<dyn VersionProvider>, settings: &DiscoverySettings) -> Self {
        Self::new(
            provider,
            settings.effective_version_timeout(),
            settings.effective_max_concurrent_probes(),
        )
    }

    /// Configured per-query timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve the display name of `executable`, or `fallback` on any failure.
    pub async fn resolve(&self, executable: &Path, fallback: &str) -> String {
        match self.query(executable).await {
            Ok(version) => version,
            Err(VersionError::Timeout { path, millis }) => {
                warn!(path = %path, millis, "Version query timed out, using fallback label");
                fallback.to_string()
            }
            Err(err) => {
                debug!(path = %executable.display(), error = %err, "Version query failed, using fallback label");
                fallback.to_string()
            }
        }
    }

    /// Run one bounded version query.
    ///
    /// Waiting for a concurrency permit does not count against the timeout.
    pub async fn query(&self, executable: &Path) -> Result<String, VersionError> {
        let path = executable.display().to_string();
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| VersionError::SpawnFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        match timeout(self.timeout, self.provider.get_version(executable)).await {
            Ok(Ok(version)) => {
                let version = version.trim();
                if version.is_empty() {
                    Err(VersionError::EmptyOutput { path })
                } else {
                    Ok(version.to_string())
                }
            }
            Ok(Err(err)) => Err(err),
            Err(_) => Err(VersionError::Timeout {
                path,
                millis: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::version_provider::MockVersionProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that never answers within any reasonable timeout.
    struct HangingProvider;

    #[async_trait]
    impl VersionProvider for HangingProvider {
        async fn get_version(&self, _executable: &Path) -> Result<String, VersionError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("Python 9.9.9".to_string())
        }
    }

    /// Provider that records the peak number of overlapping calls.
    #[derive(Default)]
    struct CountingProvider {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl VersionProvider for CountingProvider {
        async fn get_version(&self, _executable: &Path) -> Result<String, VersionError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok("Python 3.12.0".to_string())
        }
    }

    #[tokio::test]
    async fn test_resolve_returns_trimmed_version() {
        let mut provider = MockVersionProvider::new();
        provider
            .expect_get_version()
            .returning(|_| Ok("  Python 3.10.4\n".to_string()));

        let resolver = VersionResolver::new(Arc::new(provider), Duration::from_secs(1), 2);
        let name = resolver.resolve(Path::new("/usr/bin/python3"), "python3").await;
        assert_eq!(name, "Python 3.10.4");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_on_error() {
        let mut provider = MockVersionProvider::new();
        provider.expect_get_version().returning(|path| {
            Err(VersionError::NonZeroExit {
                path: path.display().to_string(),
                code: Some(1),
            })
        });

        let resolver = VersionResolver::new(Arc::new(provider), Duration::from_secs(1), 2);
        let name = resolver.resolve(Path::new("/usr/bin/python2"), "python2").await;
        assert_eq!(name, "python2");
    }

    #[tokio::test]
    async fn test_empty_output_is_an_error() {
        let mut provider = MockVersionProvider::new();
        provider
            .expect_get_version()
            .returning(|_| Ok("   ".to_string()));

        let resolver = VersionResolver::new(Arc::new(provider), Duration::from_secs(1), 1);
        let result = resolver.query(Path::new("/usr/bin/python")).await;
        assert!(matches!(result, Err(VersionError::EmptyOutput { .. })));
        assert_eq!(
            resolver.resolve(Path::new("/usr/bin/python"), "python").await,
            "python"
        );
    }

    #[tokio::test]
    async fn test_hanging_provider_times_out_to_fallback() {
        let resolver =
            VersionResolver::new(Arc::new(HangingProvider), Duration::from_millis(50), 1);

        let started = std::time::Instant::now();
        let result = resolver.query(Path::new("/usr/bin/python3")).await;
        assert!(matches!(result, Err(VersionError::Timeout { millis: 50, .. })));

        let name = resolver.resolve(Path::new("/usr/bin/python3"), "python3").await;
        assert_eq!(name, "python3");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_is_capped() {
        let provider = Arc::new(CountingProvider::default());
        let resolver = Arc::new(VersionResolver::new(
            provider.clone(),
            Duration::from_secs(5),
            2,
        ));

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let resolver = Arc::clone(&resolver);
                tokio::spawn(async move {
                    let path = format!("/usr/bin/python3.{i}");
                    resolver.resolve(Path::new(&path), "python").await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), "Python 3.12.0");
        }
        assert!(provider.peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let resolver = VersionResolver::new(Arc::new(HangingProvider), Duration::from_secs(1), 0);
        assert_eq!(resolver.permits.available_permits(), 1);
        assert_eq!(resolver.timeout(), Duration::from_secs(1));
    }
}

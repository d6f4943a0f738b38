use std::path::Path;

use async_trait::async_trait;
use pyloc_core::PathProber;
use tracing::debug;

/// [`PathProber`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPathProber;

#[async_trait]
impl PathProber for FsPathProber {
    async fn exists(&self, path: &Path) -> bool {
        match tokio::fs::try_exists(path).await {
            Ok(exists) => exists,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Treating unreadable path as missing");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_existing_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let prober = FsPathProber;

        assert!(prober.exists(dir.path()).await);
        assert!(!prober.exists(&dir.path().join("missing")).await);
    }

    #[tokio::test]
    async fn test_path_through_a_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("python3");
        std::fs::write(&file, "").unwrap();

        assert!(!FsPathProber.exists(&file.join("bin")).await);
    }
}

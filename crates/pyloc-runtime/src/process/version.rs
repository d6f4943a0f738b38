//! Version queries by running the interpreter.
//!
//! The child inherits no stdin and is killed if the query future is dropped,
//! so a timeout in the resolver also reaps a hung interpreter.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use pyloc_core::{VersionError, VersionProvider};
use tokio::process::Command;
use tracing::debug;

/// Argument passed to the interpreter to print its version.
pub const DEFAULT_VERSION_FLAG: &str = "--version";

/// [`VersionProvider`] that runs `<interpreter> --version`.
#[derive(Debug, Clone)]
pub struct ProcessVersionProvider {
    flag: String,
}

impl Default for ProcessVersionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessVersionProvider {
    /// Provider passing [`DEFAULT_VERSION_FLAG`].
    pub fn new() -> Self {
        Self {
            flag: DEFAULT_VERSION_FLAG.to_string(),
        }
    }

    /// Use a different version argument.
    pub fn with_flag(flag: impl Into<String>) -> Self {
        Self { flag: flag.into() }
    }
}

/// First trimmed line of stdout, or of stderr when stdout is blank.
///
/// Python 2 prints its version on stderr.
fn version_line(stdout: &[u8], stderr: &[u8]) -> Option<String> {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);

    let text = if stdout.trim().is_empty() {
        stderr
    } else {
        stdout
    };

    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl VersionProvider for ProcessVersionProvider {
    async fn get_version(&self, executable: &Path) -> Result<String, VersionError> {
        let path = executable.display().to_string();

        let output = Command::new(executable)
            .arg(&self.flag)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| VersionError::SpawnFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(VersionError::NonZeroExit {
                path,
                code: output.status.code(),
            });
        }

        let version = version_line(&output.stdout, &output.stderr)
            .ok_or_else(|| VersionError::EmptyOutput { path: path.clone() })?;
        debug!(path = %path, version = %version, "Resolved interpreter version");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_prefers_stdout() {
        assert_eq!(
            version_line(b"Python 3.10.4\nextra\n", b"warning\n"),
            Some("Python 3.10.4".to_string())
        );
    }

    #[test]
    fn test_version_line_falls_back_to_stderr() {
        assert_eq!(
            version_line(b"  \n", b"Python 2.7.18\n"),
            Some("Python 2.7.18".to_string())
        );
        assert_eq!(version_line(b"", b"\n \n"), None);
    }

    #[tokio::test]
    async fn test_missing_executable_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessVersionProvider::new()
            .get_version(&dir.path().join("python3"))
            .await;
        assert!(matches!(result, Err(VersionError::SpawnFailed { .. })));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_version_from_stdout() {
            let dir = tempfile::tempdir().unwrap();
            let exe = script(dir.path(), "python3", r#"echo "Python 3.10.4""#);

            let version = ProcessVersionProvider::new().get_version(&exe).await.unwrap();
            assert_eq!(version, "Python 3.10.4");
        }

        #[tokio::test]
        async fn test_version_from_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let exe = script(dir.path(), "python2", r#"echo "Python 2.7.18" >&2"#);

            let version = ProcessVersionProvider::new().get_version(&exe).await.unwrap();
            assert_eq!(version, "Python 2.7.18");
        }

        #[tokio::test]
        async fn test_non_zero_exit() {
            let dir = tempfile::tempdir().unwrap();
            let exe = script(dir.path(), "python3", "echo broken; exit 3");

            let result = ProcessVersionProvider::new().get_version(&exe).await;
            assert!(matches!(
                result,
                Err(VersionError::NonZeroExit { code: Some(3), .. })
            ));
        }

        #[tokio::test]
        async fn test_silent_executable() {
            let dir = tempfile::tempdir().unwrap();
            let exe = script(dir.path(), "python3", "exit 0");

            let result = ProcessVersionProvider::new().get_version(&exe).await;
            assert!(matches!(result, Err(VersionError::EmptyOutput { .. })));
        }

        #[tokio::test]
        async fn test_custom_flag_is_passed() {
            let dir = tempfile::tempdir().unwrap();
            let exe = script(dir.path(), "python3", r#"echo "flag=$1""#);

            let version = ProcessVersionProvider::with_flag("-V")
                .get_version(&exe)
                .await
                .unwrap();
            assert_eq!(version, "flag=-V");
        }
    }
}

//! Directory scanning for interpreter executables.
//!
//! Only direct children are considered. A child qualifies when its file name
//! matches the interpreter naming rule and it is executable.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use pyloc_core::InterpreterScanner;
use regex::Regex;
use tracing::{debug, warn};

/// `python`, `python3`, `python3.11`, ...
#[cfg(not(windows))]
static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^python(\d+(\.\d+)?)?$").expect("DEFAULT_PATTERN must compile")
});

/// `python.exe`, `python3.exe`, `python3.11.exe`, ... in any case.
#[cfg(windows)]
static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^python(\d+(\.\d+)?)?\.exe$").expect("DEFAULT_PATTERN must compile")
});

/// Check if a path has any executable permission bit set.
#[cfg(unix)]
pub fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

/// [`InterpreterScanner`] that lists interpreter executables in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    pattern: Regex,
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryScanner {
    /// Scanner using the platform's interpreter naming rule.
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }

    /// Scanner matching file names against a custom pattern.
    pub const fn with_pattern(pattern: Regex) -> Self {
        Self { pattern }
    }

    fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.pattern.is_match(name))
    }

    async fn read_candidates(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut found = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !self.matches(&path) {
                continue;
            }

            // Follows symlinks: /usr/bin/python3 is commonly a link.
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() && is_executable(&meta) => found.push(path),
                Ok(_) => debug!(path = %path.display(), "Skipping non-executable match"),
                Err(e) => debug!(path = %path.display(), error = %e, "Skipping unreadable match"),
            }
        }

        found.sort();
        Ok(found)
    }
}

#[async_trait]
impl InterpreterScanner for DirectoryScanner {
    async fn scan(&self, dir: &Path) -> Vec<PathBuf> {
        match self.read_candidates(dir).await {
            Ok(found) => found,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to scan directory");
                Vec::new()
            }
        }
    }
}

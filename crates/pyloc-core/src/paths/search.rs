//! Platform-specific search directories.

use std::path::{Path, PathBuf};

use super::error::PathError;

/// POSIX binary directories scanned on every non-Windows platform.
pub const BASE_SEARCH_DIRS: [&str; 6] = [
    "/usr/local/bin",
    "/usr/bin",
    "/bin",
    "/usr/sbin",
    "/sbin",
    "/usr/local/sbin",
];

/// Platform family, as far as search-path rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows: no well-known POSIX directories apply.
    Windows,
    /// Linux, macOS and other Unix-likes.
    Unix,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }
}

/// Known search paths for an explicit platform and home directory.
///
/// Order: the base directories, then each base directory re-rooted under
/// `home` (`/usr/local/bin` becomes `<home>/usr/local/bin`), then
/// `<home>/anaconda/bin` and `<home>/python/bin`.
pub fn known_search_paths_for(platform: Platform, home: Option<&Path>) -> Vec<PathBuf> {
    if platform == Platform::Windows {
        return Vec::new();
    }

    let mut paths: Vec<PathBuf> = BASE_SEARCH_DIRS.iter().map(PathBuf::from).collect();

    if let Some(home) = home {
        // `~` is prefixed to the absolute entry, not substituted for it.
        paths.extend(
            BASE_SEARCH_DIRS
                .iter()
                .map(|dir| home.join(dir.trim_start_matches('/'))),
        );
        paths.push(home.join("anaconda").join("bin"));
        paths.push(home.join("python").join("bin"));
    }

    paths
}

/// Expand a leading `~` in a user-supplied search path.
///
/// The result must be absolute; relative entries are rejected rather than
/// resolved against whatever the working directory happens to be.
pub fn expand_user_path(raw: &str, home: Option<&Path>) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed == "~" || trimmed.starts_with("~/") {
        let home = home.ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home.to_path_buf()
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Err(PathError::NotAbsolute(trimmed.to_string()))
    }
}

/// Known search paths followed by the user's extra search paths.
///
/// Extra entries are `~`-expanded and appended in order, skipping entries
/// already present.
pub fn resolve_search_paths(
    platform: Platform,
    home: Option<&Path>,
    extra: &[String],
) -> Result<Vec<PathBuf>, PathError> {
    let mut paths = known_search_paths_for(platform, home);
    for raw in extra {
        let path = expand_user_path(raw, home)?;
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_has_no_search_paths() {
        let paths = known_search_paths_for(Platform::Windows, Some(Path::new("/home/u")));
        assert!(paths.is_empty());
    }

    #[test]
    fn test_unix_without_home_has_base_dirs_only() {
        let paths = known_search_paths_for(Platform::Unix, None);
        assert_eq!(paths.len(), BASE_SEARCH_DIRS.len());
        assert_eq!(paths[0], PathBuf::from("/usr/local/bin"));
        assert_eq!(paths[5], PathBuf::from("/usr/local/sbin"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_with_home_appends_home_relative_entries() {
        let home = Path::new("/home/dev");
        let paths = known_search_paths_for(Platform::Unix, Some(home));

        assert_eq!(paths.len(), 14);
        assert_eq!(paths[6], PathBuf::from("/home/dev/usr/local/bin"));
        assert_eq!(paths[8], PathBuf::from("/home/dev/bin"));
        assert_eq!(paths[11], PathBuf::from("/home/dev/usr/local/sbin"));
        assert_eq!(paths[12], PathBuf::from("/home/dev/anaconda/bin"));
        assert_eq!(paths[13], PathBuf::from("/home/dev/python/bin"));
    }

    #[test]
    fn test_current_platform_matches_cfg() {
        #[cfg(windows)]
        assert_eq!(Platform::current(), Platform::Windows);
        #[cfg(not(windows))]
        assert_eq!(Platform::current(), Platform::Unix);
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_user_path_tilde() {
        let home = Path::new("/home/dev");
        assert_eq!(
            expand_user_path("~/miniconda3/bin", Some(home)).unwrap(),
            PathBuf::from("/home/dev/miniconda3/bin")
        );
        assert_eq!(
            expand_user_path("~", Some(home)).unwrap(),
            PathBuf::from("/home/dev")
        );
    }

    #[test]
    fn test_expand_user_path_errors() {
        assert!(matches!(
            expand_user_path("   ", None),
            Err(PathError::EmptyPath)
        ));
        assert!(matches!(
            expand_user_path("~/bin", None),
            Err(PathError::NoHomeDir)
        ));
        assert!(matches!(
            expand_user_path("relative/bin", None),
            Err(PathError::NotAbsolute(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_user_path_absolute_passthrough() {
        assert_eq!(
            expand_user_path(" /opt/python/bin ", None).unwrap(),
            PathBuf::from("/opt/python/bin")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_search_paths_appends_extras() {
        let home = Path::new("/home/dev");
        let extra = vec![
            "~/miniconda3/bin".to_string(),
            "/usr/bin".to_string(),
            "/opt/python/bin".to_string(),
        ];
        let paths = resolve_search_paths(Platform::Unix, Some(home), &extra).unwrap();

        assert_eq!(paths.len(), 16);
        assert_eq!(paths[14], PathBuf::from("/home/dev/miniconda3/bin"));
        assert_eq!(paths[15], PathBuf::from("/opt/python/bin"));
    }

    #[test]
    fn test_resolve_search_paths_rejects_bad_extra() {
        let extra = vec!["relative".to_string()];
        assert!(matches!(
            resolve_search_paths(Platform::Unix, None, &extra),
            Err(PathError::NotAbsolute(_))
        ));
    }
}

//! Interpreter domain types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Classification of a discovered interpreter.
///
/// Strategies that have no way to tell environments apart (such as the
/// known-paths scan) report [`InterpreterKind::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpreterKind {
    /// No classification available.
    #[default]
    Unknown,
    /// Interpreter inside a conda environment.
    Conda,
    /// Interpreter inside a `virtualenv` environment.
    VirtualEnv,
    /// Interpreter inside a `venv` environment.
    Venv,
    /// Interpreter managed by pyenv.
    Pyenv,
    /// Interpreter inside a pipenv environment.
    Pipenv,
    /// Interpreter shipped with the operating system.
    System,
}

impl InterpreterKind {
    /// Short label used in listings.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Conda => "conda",
            Self::VirtualEnv => "virtualenv",
            Self::Venv => "venv",
            Self::Pyenv => "pyenv",
            Self::Pipenv => "pipenv",
            Self::System => "system",
        }
    }
}

impl fmt::Display for InterpreterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A discovered interpreter executable.
///
/// The absolute `path` is the identity of an interpreter within a result set.
/// Values are immutable once built by a discovery strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpreter {
    /// Absolute path to the executable.
    pub path: PathBuf,
    /// Human-readable label, usually the resolved version string.
    pub display_name: String,
    /// Environment classification.
    pub kind: InterpreterKind,
}

impl Interpreter {
    /// Create a new interpreter record.
    pub fn new(path: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
            kind: InterpreterKind::Unknown,
        }
    }

    /// Set the interpreter kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: InterpreterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Path of the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base file name of the executable, used as the fallback display label.
    pub fn file_name(&self) -> String {
        fallback_label(&self.path)
    }
}

/// Fallback label for an executable path: its base file name.
pub(crate) fn fallback_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Remove interpreters whose path was already seen, keeping the first one.
///
/// Relative order of the surviving entries is preserved.
pub fn dedupe_by_path(interpreters: Vec<Interpreter>) -> Vec<Interpreter> {
    let mut seen = HashSet::with_capacity(interpreters.len());
    interpreters
        .into_iter()
        .filter(|interpreter| seen.insert(interpreter.path.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_unknown_kind() {
        let interpreter = Interpreter::new("/usr/bin/python3", "Python 3.10.4");
        assert_eq!(interpreter.kind, InterpreterKind::Unknown);
        assert_eq!(interpreter.file_name(), "python3");
    }

    #[test]
    fn test_with_kind() {
        let interpreter =
            Interpreter::new("/opt/conda/bin/python", "Python 3.11").with_kind(InterpreterKind::Conda);
        assert_eq!(interpreter.kind, InterpreterKind::Conda);
        assert_eq!(interpreter.kind.to_string(), "conda");
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let list = vec![
            Interpreter::new("/usr/bin/python3", "first"),
            Interpreter::new("/usr/local/bin/python3", "other"),
            Interpreter::new("/usr/bin/python3", "second"),
        ];

        let deduped = dedupe_by_path(list);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].display_name, "first");
        assert_eq!(deduped[1].path, PathBuf::from("/usr/local/bin/python3"));
    }

    #[test]
    fn test_fallback_label_for_root_is_empty() {
        assert_eq!(fallback_label(Path::new("/")), "");
    }

    #[test]
    fn test_serde_kind_snake_case() {
        let json = serde_json::to_string(&InterpreterKind::VirtualEnv).unwrap();
        assert_eq!(json, "\"virtual_env\"");
    }
}

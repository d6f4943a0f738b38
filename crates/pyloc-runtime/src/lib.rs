//! OS adapters for the pyloc discovery ports.
//!
//! - [`FsPathProber`] and [`DirectoryScanner`] probe the real filesystem
//! - [`ProcessVersionProvider`] asks an interpreter for its version
//! - [`JsonFileCacheStore`] persists discovery snapshots as JSON files

#![deny(unused_crate_dependencies)]

pub mod cache;
pub mod fs;
pub mod process;

pub use cache::{CachedSnapshot, JsonFileCacheStore};
pub use fs::{DirectoryScanner, FsPathProber, is_executable};
pub use process::{DEFAULT_VERSION_FLAG, ProcessVersionProvider};

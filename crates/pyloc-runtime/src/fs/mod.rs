//! Filesystem adapters for the probing ports.

mod prober;
mod scanner;

pub use prober::FsPathProber;
pub use scanner::{DirectoryScanner, is_executable};

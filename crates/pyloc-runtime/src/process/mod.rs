//! Out-of-process interpreter queries.

mod version;

pub use version::{DEFAULT_VERSION_FLAG, ProcessVersionProvider};

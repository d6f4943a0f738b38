//! Persistent storage for discovery snapshots.

mod json_store;

pub use json_store::{CachedSnapshot, JsonFileCacheStore};

//! Search-path derivation for interpreter discovery.
//!
//! This module computes the well-known directories the known-paths strategy
//! scans. The list is computed once at bootstrap and is read-only afterwards.
//!
//! # Design
//!
//! - Pure functions take the platform and home directory as inputs
//! - Callers read the real environment (`dirs`) and pass it in

mod error;
mod search;

pub use error::PathError;
pub use search::{
    BASE_SEARCH_DIRS, Platform, expand_user_path, known_search_paths_for,
    resolve_search_paths,
};

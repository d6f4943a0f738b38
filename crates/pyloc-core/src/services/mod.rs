//! Core services - the discovery business logic.
//!
//! Services orchestrate between ports (trait interfaces) and domain types.
//! They never touch the filesystem or spawn processes directly.

mod aggregator;
mod caching_locator;
mod known_paths;
mod version_resolver;

pub use aggregator::{AGGREGATE_LOCATOR, InterpreterAggregator};
pub use caching_locator::{CachingLocator, EntryStatus, LocatorOptions};
pub use known_paths::{KNOWN_PATHS_LOCATOR, KnownPathsStrategy};
pub use version_resolver::VersionResolver;

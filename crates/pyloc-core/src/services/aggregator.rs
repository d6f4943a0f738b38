//! Combines several locators into one result set.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::domain::{Interpreter, Scope, dedupe_by_path};
use crate::ports::{InterpreterLocator, LocatorError};

/// Name reported by the aggregator in logs and errors.
pub const AGGREGATE_LOCATOR: &str = "aggregate";

/// Queries every child locator concurrently and merges their results.
///
/// Results keep locator order and are deduplicated by path, first occurrence
/// wins. A failing child is logged and skipped.
pub struct InterpreterAggregator {
    locators: Vec<Arc<dyn InterpreterLocator>>,
    disposed: AtomicBool,
}

impl InterpreterAggregator {
    /// Aggregate `locators`, queried and merged in the given order.
    pub fn new(locators: Vec<Arc<dyn InterpreterLocator>>) -> Self {
        Self {
            locators,
            disposed: AtomicBool::new(false),
        }
    }

    /// Child locators, in query order.
    pub fn locators(&self) -> &[Arc<dyn InterpreterLocator>] {
        &self.locators
    }
}

#[async_trait]
impl InterpreterLocator for InterpreterAggregator {
    fn name(&self) -> &str {
        AGGREGATE_LOCATOR
    }

    async fn get_interpreters(
        &self,
        scope: Option<&Scope>,
    ) -> Result<Vec<Interpreter>, LocatorError> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(LocatorError::Disposed {
                locator: AGGREGATE_LOCATOR.to_string(),
            });
        }

        let results = join_all(
            self.locators
                .iter()
                .map(|locator| locator.get_interpreters(scope)),
        )
        .await;

        let mut merged = Vec::new();
        for (locator, result) in self.locators.iter().zip(results) {
            match result {
                Ok(found) => merged.extend(found),
                Err(e) => warn!(locator = %locator.name(), error = %e, "Locator failed, skipping"),
            }
        }

        let merged = dedupe_by_path(merged);
        debug!(count = merged.len(), "Aggregated interpreters");
        Ok(merged)
    }

    fn invalidate(&self, scope: Option<&Scope>) {
        for locator in &self.locators {
            locator.invalidate(scope);
        }
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        for locator in &self.locators {
            locator.dispose();
        }
    }
}

//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (filesystem, processes, persistence).
//!
//! # Structure
//!
//! - `interpreter` - Discovered interpreter records (`Interpreter`, `InterpreterKind`)
//! - `scope` - Cache partitioning (`Scope`, `ScopeKey`)

pub(crate) mod interpreter;
mod scope;

pub use interpreter::{Interpreter, InterpreterKind, dedupe_by_path};
pub use scope::{Scope, ScopeKey};

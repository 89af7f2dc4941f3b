//! Domain model for vault notes and promotion decisions.
//!
//! # Responsibility
//! - Define the canonical metadata record read from and written to note
//!   headers.
//! - Define the status/type/category vocabulary shared by gate, executor
//!   and runner.
//!
//! # Invariants
//! - `quality_score` is either absent or within [0.0, 1.0].
//! - Unknown note types are carried verbatim, never silently rewritten.

pub mod note;

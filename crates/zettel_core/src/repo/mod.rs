//! Repository layer over note storage.
//!
//! # Responsibility
//! - Define the note access contract consumed by gate/executor/runner.
//! - Isolate filesystem details from service orchestration.
//!
//! # Invariants
//! - Store paths must pass `NoteMetadata::validate()` before bytes are
//!   written.
//! - Repository APIs return semantic per-note errors; they never panic on
//!   malformed input.

pub mod note_repo;

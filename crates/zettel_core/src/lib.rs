//! Core domain logic for quality-gated vault note promotion.
//! This crate is the single source of truth for promotion invariants.

pub mod frontmatter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod vault;

pub use logging::{default_log_level, init_logging};
pub use model::note::{
    Category, MetadataValidationError, NoteMetadata, NoteStatus, NoteType,
};
pub use repo::note_repo::{FsNoteRepository, NoteFile, NoteRepository, RepoError, RepoResult};
pub use service::batch::{
    BatchError, BatchOptions, BatchRunner, BatchSummary, Outcome, PromotionResult,
};
pub use service::promotion::{PromoteError, PromotionExecutor};
pub use service::quality_gate::{decide, Decision, SkipReason, DEFAULT_QUALITY_THRESHOLD};
pub use service::report::render_summary;
pub use vault::{VaultLayout, DEFAULT_INBOX_DIR};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! Promotion executor.
//!
//! # Responsibility
//! - Move one qualifying note into its category folder and rewrite its
//!   status and timestamps in a single logical step.
//!
//! # Invariants
//! - Only the executor changes a note's directory and its `status` field,
//!   and it always changes both together.
//! - On any failure the source note is left exactly as it was; a copy
//!   already placed at the destination is rolled back.
//! - Re-invoking on a note whose status is not `inbox` is rejected without
//!   touching the filesystem.

use crate::model::note::{Category, NoteStatus};
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::vault::VaultLayout;
use chrono::Local;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Per-note promotion failure.
#[derive(Debug)]
pub enum PromoteError {
    /// Note status is not `inbox`; promoting again would double-move it.
    AlreadyProcessed { path: PathBuf, status: NoteStatus },
    /// A different file already sits at the destination path.
    DestinationExists { path: PathBuf },
    /// Storage-level failure before any mutation took effect.
    Repo(RepoError),
    /// The copy reached the destination but the source could not be
    /// removed; the destination copy has been rolled back.
    SourceCleanup { path: PathBuf, source: RepoError },
}

impl Display for PromoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyProcessed { path, status } => write!(
                f,
                "note `{}` has status `{}` and is not a promotion candidate",
                path.display(),
                status.as_str()
            ),
            Self::DestinationExists { path } => {
                write!(f, "destination `{}` already exists", path.display())
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::SourceCleanup { path, source } => write!(
                f,
                "could not remove source note `{}` after copy (destination rolled back): {source}",
                path.display()
            ),
        }
    }
}

impl Error for PromoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::SourceCleanup { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RepoError> for PromoteError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Executes single-note promotions against one vault layout.
pub struct PromotionExecutor<'a, R: NoteRepository> {
    repo: &'a R,
    layout: &'a VaultLayout,
}

impl<'a, R: NoteRepository> PromotionExecutor<'a, R> {
    pub fn new(repo: &'a R, layout: &'a VaultLayout) -> Self {
        Self { repo, layout }
    }

    /// Promotes one note into `category` and returns the destination path.
    ///
    /// The rewritten note is created at the destination first and the
    /// source removed second; a failed removal rolls the destination back
    /// so the pair of mutations is all-or-nothing.
    pub fn promote(&self, path: &Path, category: Category) -> Result<PathBuf, PromoteError> {
        let note = self.repo.load(path)?;
        if note.metadata.status != NoteStatus::Inbox {
            return Err(PromoteError::AlreadyProcessed {
                path: path.to_path_buf(),
                status: note.metadata.status,
            });
        }

        let target_dir = self.layout.dir_for(category);
        fs::create_dir_all(target_dir).map_err(|source| {
            PromoteError::Repo(RepoError::Io {
                path: target_dir.to_path_buf(),
                source,
            })
        })?;

        let Some(file_name) = path.file_name() else {
            return Err(PromoteError::Repo(RepoError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "note path has no file name"),
            }));
        };
        let destination = target_dir.join(file_name);

        let mut metadata = note.metadata.clone();
        metadata.status = NoteStatus::Promoted;
        let stamp = now_stamp();
        metadata.promoted_date = Some(stamp.clone());
        metadata.processed_date = Some(stamp);

        self.repo
            .store_new(&destination, &metadata, &note.body)
            .map_err(|err| {
                if err.is_already_exists() {
                    PromoteError::DestinationExists {
                        path: destination.clone(),
                    }
                } else {
                    PromoteError::Repo(err)
                }
            })?;

        if let Err(source) = self.repo.remove(path) {
            // Invariant: never leave the note in two places at once.
            if let Err(rollback) = self.repo.remove(&destination) {
                warn!(
                    "event=promotion_rollback_failed module=promotion status=error \
                     destination={} error={rollback}",
                    destination.display()
                );
            }
            return Err(PromoteError::SourceCleanup {
                path: path.to_path_buf(),
                source,
            });
        }

        info!(
            "event=note_promoted module=promotion status=ok source={} destination={} category={}",
            path.display(),
            destination.display(),
            category
        );
        Ok(destination)
    }
}

fn now_stamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

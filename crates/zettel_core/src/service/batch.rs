//! Batch promotion runner.
//!
//! # Responsibility
//! - Sweep one intake directory, gate every note and execute or simulate
//!   the qualifying promotions.
//! - Aggregate per-note outcomes into one summary.
//!
//! # Invariants
//! - A single malformed or failing note never aborts the sweep.
//! - Notes are processed in sorted filename order, strictly sequentially.
//! - A dry run records the same per-note decisions as a real run over an
//!   unchanged directory.

use crate::model::note::Category;
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::service::promotion::PromotionExecutor;
use crate::service::quality_gate::{decide, Decision, SkipReason, DEFAULT_QUALITY_THRESHOLD};
use crate::service::report::derive_body_preview;
use crate::vault::VaultLayout;
use log::{debug, info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Knobs for one batch invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchOptions {
    /// Minimum quality score for promotion.
    pub threshold: f64,
    /// When set, decisions are computed but nothing on disk changes.
    pub dry_run: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_QUALITY_THRESHOLD,
            dry_run: false,
        }
    }
}

/// Structural failure that aborts the whole invocation.
#[derive(Debug)]
pub enum BatchError {
    /// The intake directory itself cannot be listed.
    SourceDir { path: PathBuf, source: RepoError },
}

impl Display for BatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceDir { path, source } => write!(
                f,
                "cannot read source directory `{}`: {source}",
                path.display()
            ),
        }
    }
}

impl Error for BatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SourceDir { source, .. } => Some(source),
        }
    }
}

/// Final decision recorded for one note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Promoted { category: Category },
    Skipped { reason: SkipReason },
    Error { message: String },
}

/// Per-note record kept in the summary, in processing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionResult {
    pub path: PathBuf,
    /// Sanitized first line of the body, for human-readable listings.
    pub preview: Option<String>,
    pub outcome: Outcome,
}

/// Aggregate result of one batch invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub promoted: usize,
    /// Candidates turned away by threshold or unsupported type.
    pub skipped: usize,
    /// Notes that were never candidates (no score, already processed).
    pub not_candidates: usize,
    pub errors: usize,
    pub dry_run: bool,
    pub results: Vec<PromotionResult>,
}

impl BatchSummary {
    fn record(&mut self, result: PromotionResult) {
        match &result.outcome {
            Outcome::Promoted { .. } => self.promoted += 1,
            Outcome::Skipped { reason } if reason.is_candidate_miss() => self.not_candidates += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Error { .. } => self.errors += 1,
        }
        self.results.push(result);
    }
}

/// Sweeps an intake directory through gate and executor.
pub struct BatchRunner<'a, R: NoteRepository> {
    repo: &'a R,
    layout: &'a VaultLayout,
}

impl<'a, R: NoteRepository> BatchRunner<'a, R> {
    pub fn new(repo: &'a R, layout: &'a VaultLayout) -> Self {
        Self { repo, layout }
    }

    /// Runs one batch over `source_dir`.
    ///
    /// Per-note failures are folded into the summary; only an unreadable
    /// source directory is fatal.
    pub fn run(&self, source_dir: &Path, options: &BatchOptions) -> Result<BatchSummary, BatchError> {
        let paths = self
            .repo
            .list_note_paths(source_dir)
            .map_err(|source| BatchError::SourceDir {
                path: source_dir.to_path_buf(),
                source,
            })?;

        info!(
            "event=batch_start module=batch status=ok source={} notes={} threshold={} dry_run={}",
            source_dir.display(),
            paths.len(),
            options.threshold,
            options.dry_run
        );

        let executor = PromotionExecutor::new(self.repo, self.layout);
        let mut summary = BatchSummary {
            dry_run: options.dry_run,
            ..BatchSummary::default()
        };

        for path in paths {
            summary.record(self.process_note(&executor, &path, options));
        }

        info!(
            "event=batch_done module=batch status=ok promoted={} skipped={} not_candidates={} \
             errors={} dry_run={}",
            summary.promoted,
            summary.skipped,
            summary.not_candidates,
            summary.errors,
            summary.dry_run
        );
        Ok(summary)
    }

    fn process_note(
        &self,
        executor: &PromotionExecutor<'_, R>,
        path: &Path,
        options: &BatchOptions,
    ) -> PromotionResult {
        let note = match self.repo.load(path) {
            Ok(note) => note,
            Err(err) => {
                warn!(
                    "event=note_rejected module=batch status=error note={} error={err}",
                    path.display()
                );
                return PromotionResult {
                    path: path.to_path_buf(),
                    preview: None,
                    outcome: Outcome::Error {
                        message: err.to_string(),
                    },
                };
            }
        };

        let preview = derive_body_preview(&note.body);
        let outcome = match decide(&note.metadata, options.threshold) {
            Decision::Skip { reason } => {
                debug!(
                    "event=note_skipped module=batch status=ok note={} reason={reason}",
                    path.display()
                );
                Outcome::Skipped { reason }
            }
            Decision::Promote { category } if options.dry_run => {
                debug!(
                    "event=note_promotable module=batch status=ok note={} category={category} \
                     dry_run=true",
                    path.display()
                );
                Outcome::Promoted { category }
            }
            Decision::Promote { category } => match executor.promote(path, category) {
                Ok(_) => Outcome::Promoted { category },
                Err(err) => {
                    warn!(
                        "event=note_promotion_failed module=batch status=error note={} error={err}",
                        path.display()
                    );
                    Outcome::Error {
                        message: err.to_string(),
                    }
                }
            },
        };

        PromotionResult {
            path: path.to_path_buf(),
            preview,
            outcome,
        }
    }
}

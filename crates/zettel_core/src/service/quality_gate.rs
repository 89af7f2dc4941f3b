//! Quality gate decision function.
//!
//! # Responsibility
//! - Map one note's metadata and a threshold to a promotion decision.
//!
//! # Invariants
//! - Pure and deterministic: identical input always yields the identical
//!   decision, with no side effects.
//! - A note without a quality score is never an error, only a non-candidate.
//! - A below-threshold score skips regardless of note type.

use crate::model::note::{Category, NoteMetadata, NoteStatus};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Threshold applied when the caller does not configure one.
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 0.7;

/// Outcome of gating one note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Note qualifies; move it into `category`.
    Promote { category: Category },
    /// Note stays where it is.
    Skip { reason: SkipReason },
}

/// Why a note was not promoted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Status is no longer `inbox`; the note already went through.
    AlreadyProcessed,
    /// No external scoring has happened yet.
    NoQualityScore,
    /// Scored, but under the configured bar.
    BelowThreshold { score: f64, threshold: f64 },
    /// Score passes but the declared type has no destination folder.
    UnsupportedType,
}

impl SkipReason {
    /// Non-candidates are reported separately from genuine skips.
    pub fn is_candidate_miss(self) -> bool {
        matches!(self, Self::AlreadyProcessed | Self::NoQualityScore)
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyProcessed => write!(f, "already processed"),
            Self::NoQualityScore => write!(f, "no quality score"),
            Self::BelowThreshold { score, threshold } => {
                write!(f, "quality score {score:.2} below threshold {threshold:.2}")
            }
            Self::UnsupportedType => write!(f, "unsupported note type"),
        }
    }
}

/// Decides whether one note advances out of the inbox.
pub fn decide(metadata: &NoteMetadata, threshold: f64) -> Decision {
    if metadata.status != NoteStatus::Inbox {
        return Decision::Skip {
            reason: SkipReason::AlreadyProcessed,
        };
    }

    let Some(score) = metadata.quality_score else {
        return Decision::Skip {
            reason: SkipReason::NoQualityScore,
        };
    };

    if score < threshold {
        return Decision::Skip {
            reason: SkipReason::BelowThreshold { score, threshold },
        };
    }

    match metadata.kind.as_ref().and_then(|kind| kind.promotion_category()) {
        Some(category) => Decision::Promote { category },
        None => Decision::Skip {
            reason: SkipReason::UnsupportedType,
        },
    }
}

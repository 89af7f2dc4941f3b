//! Note metadata model.
//!
//! # Responsibility
//! - Define the typed metadata record backing every note header.
//! - Provide the status/type vocabulary and the type-to-category mapping
//!   used by the promotion gate.
//!
//! # Invariants
//! - A missing `status` field means [`NoteStatus::Inbox`]; the note is still
//!   a promotion candidate.
//! - `quality_score` outside [0.0, 1.0] never passes validation.
//! - `extra` preserves unrecognized header lines verbatim and in order.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lifecycle state of a note within the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteStatus {
    /// Captured but not yet categorized.
    Inbox,
    /// Moved into a categorized knowledge folder.
    Promoted,
    /// Retired from active circulation.
    Archived,
}

impl NoteStatus {
    /// Stable on-disk spelling of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Promoted => "promoted",
            Self::Archived => "archived",
        }
    }

    /// Parses the on-disk spelling. Unknown spellings are rejected so a
    /// mistyped status surfaces as a malformed note instead of silently
    /// re-entering candidacy.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inbox" => Some(Self::Inbox),
            "promoted" => Some(Self::Promoted),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl Default for NoteStatus {
    fn default() -> Self {
        Self::Inbox
    }
}

/// Declared kind of a note, as written in its header.
///
/// Unknown spellings land in [`NoteType::Other`] with the raw text kept, so
/// rewriting a note never loses what the author wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    Fleeting,
    Literature,
    Permanent,
    Dashboard,
    Other(String),
}

impl NoteType {
    /// On-disk spelling of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fleeting => "fleeting",
            Self::Literature => "literature",
            Self::Permanent => "permanent",
            Self::Dashboard => "dashboard",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Parses the on-disk spelling. Never fails; unknown values are carried
    /// through as [`NoteType::Other`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "fleeting" => Self::Fleeting,
            "literature" => Self::Literature,
            "permanent" => Self::Permanent,
            "dashboard" => Self::Dashboard,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    /// Target category for promotion, when this type supports one.
    pub fn promotion_category(&self) -> Option<Category> {
        match self {
            Self::Fleeting => Some(Category::Fleeting),
            Self::Literature => Some(Category::Literature),
            Self::Permanent => Some(Category::Permanent),
            Self::Dashboard | Self::Other(_) => None,
        }
    }
}

/// Knowledge folder a note can be promoted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fleeting,
    Literature,
    Permanent,
}

impl Category {
    /// Human-readable folder label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fleeting => "Fleeting Notes",
            Self::Literature => "Literature Notes",
            Self::Permanent => "Permanent Notes",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed metadata record for one note header.
///
/// Fields the promotion workflow does not understand are preserved in
/// `extra` as raw `key: value` lines so a read-modify-write cycle keeps
/// them intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteMetadata {
    /// Lifecycle state; missing on disk means `Inbox`.
    pub status: NoteStatus,
    /// Declared note kind, if any.
    pub kind: Option<NoteType>,
    /// Score in [0.0, 1.0] attached by an external scoring process.
    pub quality_score: Option<f64>,
    /// Set by the promotion executor, local time.
    pub promoted_date: Option<String>,
    /// Set by the promotion executor, local time.
    pub processed_date: Option<String>,
    /// Unrecognized header lines, verbatim and in original order.
    pub extra: Vec<String>,
}

impl NoteMetadata {
    /// Checks invariants that must hold before the record is persisted.
    pub fn validate(&self) -> Result<(), MetadataValidationError> {
        if let Some(score) = self.quality_score {
            if !(0.0..=1.0).contains(&score) || score.is_nan() {
                return Err(MetadataValidationError::QualityScoreOutOfRange(score));
            }
        }
        Ok(())
    }
}

/// Validation failure for a metadata record.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValidationError {
    QualityScoreOutOfRange(f64),
}

impl Display for MetadataValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QualityScoreOutOfRange(score) => {
                write!(f, "quality_score {score} outside [0.0, 1.0]")
            }
        }
    }
}

impl Error for MetadataValidationError {}

#[cfg(test)]
mod tests {
    use super::{Category, MetadataValidationError, NoteMetadata, NoteStatus, NoteType};

    #[test]
    fn status_parse_accepts_known_spellings_only() {
        assert_eq!(NoteStatus::parse(" Inbox "), Some(NoteStatus::Inbox));
        assert_eq!(NoteStatus::parse("promoted"), Some(NoteStatus::Promoted));
        assert_eq!(NoteStatus::parse("done"), None);
    }

    #[test]
    fn type_parse_keeps_unknown_spelling() {
        assert_eq!(NoteType::parse("fleeting"), NoteType::Fleeting);
        let other = NoteType::parse("meeting-minutes");
        assert_eq!(other, NoteType::Other("meeting-minutes".to_string()));
        assert_eq!(other.as_str(), "meeting-minutes");
    }

    #[test]
    fn promotion_category_covers_supported_types_only() {
        assert_eq!(
            NoteType::Fleeting.promotion_category(),
            Some(Category::Fleeting)
        );
        assert_eq!(
            NoteType::Permanent.promotion_category(),
            Some(Category::Permanent)
        );
        assert_eq!(NoteType::Dashboard.promotion_category(), None);
        assert_eq!(NoteType::Other("x".to_string()).promotion_category(), None);
    }

    #[test]
    fn validate_rejects_out_of_range_score() {
        let mut metadata = NoteMetadata {
            quality_score: Some(1.5),
            ..NoteMetadata::default()
        };
        assert_eq!(
            metadata.validate(),
            Err(MetadataValidationError::QualityScoreOutOfRange(1.5))
        );

        metadata.quality_score = Some(0.7);
        assert!(metadata.validate().is_ok());
    }
}

//! Note header parsing and rendering.
//!
//! # Responsibility
//! - Split a note file into its `---`-fenced header block and markdown body.
//! - Map header lines onto the typed [`NoteMetadata`] record and back.
//!
//! # Invariants
//! - A note without a header block is valid and yields default metadata.
//! - A header block that opens but never closes is a parse error.
//! - Lines the workflow does not understand survive a parse/render cycle
//!   verbatim and in order.

use crate::model::note::{MetadataValidationError, NoteMetadata, NoteStatus, NoteType};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FENCE: &str = "---";

/// Parse failure for one note header.
#[derive(Debug)]
pub enum ParseError {
    /// Header fence opened but never closed.
    UnterminatedHeader,
    /// `status` value is not one of the known spellings.
    InvalidStatus(String),
    /// `quality_score` value is not a float.
    InvalidQualityScore(String),
    /// Parsed record violates a model invariant.
    Validation(MetadataValidationError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedHeader => write!(f, "metadata header is never closed by `---`"),
            Self::InvalidStatus(raw) => write!(f, "invalid status value `{raw}`"),
            Self::InvalidQualityScore(raw) => {
                write!(f, "invalid quality_score value `{raw}`")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MetadataValidationError> for ParseError {
    fn from(value: MetadataValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Splits note content into typed metadata and markdown body.
///
/// Content without a leading `---` fence is treated as all body with default
/// metadata, keeping capture tools that skip headers out of the error path.
pub fn parse_note(content: &str) -> Result<(NoteMetadata, String), ParseError> {
    let mut lines = content.lines();
    match lines.next() {
        Some(first) if first.trim_end() == FENCE => {}
        _ => return Ok((NoteMetadata::default(), content.to_string())),
    }

    let mut metadata = NoteMetadata::default();
    let mut closed = false;
    let mut consumed = 1usize;

    for line in lines {
        consumed += 1;
        if line.trim_end() == FENCE {
            closed = true;
            break;
        }
        apply_header_line(&mut metadata, line)?;
    }

    if !closed {
        return Err(ParseError::UnterminatedHeader);
    }

    metadata.validate()?;

    let body: String = content
        .lines()
        .skip(consumed)
        .collect::<Vec<_>>()
        .join("\n");
    // One separating blank line after the fence belongs to the header shape,
    // not the body; render_note puts it back.
    let body = body.strip_prefix('\n').unwrap_or(&body).to_string();
    Ok((metadata, body))
}

/// Renders metadata and body back into note file content.
///
/// Known fields come first in a stable order, then preserved unknown lines.
pub fn render_note(metadata: &NoteMetadata, body: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(FENCE.to_string());
    lines.push(format!("status: {}", metadata.status.as_str()));
    if let Some(kind) = &metadata.kind {
        lines.push(format!("type: {}", kind.as_str()));
    }
    if let Some(score) = metadata.quality_score {
        lines.push(format!("quality_score: {score}"));
    }
    if let Some(date) = &metadata.promoted_date {
        lines.push(format!("promoted_date: {date}"));
    }
    if let Some(date) = &metadata.processed_date {
        lines.push(format!("processed_date: {date}"));
    }
    for raw in &metadata.extra {
        lines.push(raw.clone());
    }
    lines.push(FENCE.to_string());
    lines.push(String::new());

    let mut out = lines.join("\n");
    out.push('\n');
    out.push_str(body);
    out
}

fn apply_header_line(metadata: &mut NoteMetadata, line: &str) -> Result<(), ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let Some((key, value)) = trimmed.split_once(':') else {
        // Not a key-value line; keep it so nothing the author wrote is lost.
        metadata.extra.push(line.to_string());
        return Ok(());
    };

    let key = key.trim();
    let value = unquote(value);

    match key {
        "status" => {
            if value.is_empty() {
                return Ok(());
            }
            metadata.status = NoteStatus::parse(&value)
                .ok_or_else(|| ParseError::InvalidStatus(value.clone()))?;
        }
        "type" => {
            if !value.is_empty() {
                metadata.kind = Some(NoteType::parse(&value));
            }
        }
        "quality_score" => {
            if value.is_empty() {
                return Ok(());
            }
            let score: f64 = value
                .parse()
                .map_err(|_| ParseError::InvalidQualityScore(value.clone()))?;
            metadata.quality_score = Some(score);
        }
        "promoted_date" => {
            if !value.is_empty() {
                metadata.promoted_date = Some(value);
            }
        }
        "processed_date" => {
            if !value.is_empty() {
                metadata.processed_date = Some(value);
            }
        }
        _ => metadata.extra.push(line.to_string()),
    }

    Ok(())
}

/// Removes one layer of surrounding quotes and outer whitespace.
fn unquote(value: &str) -> String {
    let trimmed = value.trim();
    let stripped = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            trimmed
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        });
    stripped.unwrap_or(trimmed).to_string()
}

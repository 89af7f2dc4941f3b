//! Human-readable batch reporting.
//!
//! # Responsibility
//! - Render one [`BatchSummary`] as terminal output.
//! - Derive a sanitized one-line preview from markdown note bodies.
//!
//! # Invariants
//! - Rendering never mutates the summary; dry-run and real-run summaries
//!   with equal decisions render to equal listings apart from the header.

use crate::service::batch::{BatchSummary, Outcome};
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 60;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Derives a short plain-text preview from a markdown body.
///
/// Rules: images dropped, links reduced to their label, markdown symbols
/// removed, whitespace collapsed, first 60 chars retained.
pub fn derive_body_preview(body: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(body, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

/// Renders the summary for terminal output.
pub fn render_summary(summary: &BatchSummary) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mode = if summary.dry_run { " (dry run)" } else { "" };
    lines.push(format!("promotion batch{mode}"));
    lines.push(format!(
        "  promoted={} skipped={} not_candidates={} errors={}",
        summary.promoted, summary.skipped, summary.not_candidates, summary.errors
    ));

    for result in &summary.results {
        let name = result
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| result.path.display().to_string());
        let line = match &result.outcome {
            Outcome::Promoted { category } => format!("  PROMOTE {name} -> {category}"),
            Outcome::Skipped { reason } => format!("  skip    {name} ({reason})"),
            Outcome::Error { message } => format!("  ERROR   {name}: {message}"),
        };
        match &result.preview {
            Some(preview) => lines.push(format!("{line} | {preview}")),
            None => lines.push(line),
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{derive_body_preview, render_summary};
    use crate::model::note::Category;
    use crate::service::batch::{BatchSummary, Outcome, PromotionResult};
    use std::path::PathBuf;

    #[test]
    fn preview_strips_markdown_and_limits_length() {
        let body = "# Title\n\n- [link](https://example.com)\n**bold** `code` ![img](x.png)";
        let preview = derive_body_preview(body).expect("preview should exist");
        assert!(preview.contains("Title"));
        assert!(preview.contains("link"));
        assert!(!preview.contains('#'));
        assert!(!preview.contains('*'));
        assert!(!preview.contains("x.png"));
        assert!(preview.chars().count() <= 60);
    }

    #[test]
    fn preview_of_blank_body_is_none() {
        assert_eq!(derive_body_preview("  \n\n"), None);
    }

    #[test]
    fn summary_rendering_lists_counts_and_outcomes() {
        let mut summary = BatchSummary {
            promoted: 1,
            dry_run: true,
            ..BatchSummary::default()
        };
        summary.results.push(PromotionResult {
            path: PathBuf::from("/vault/Inbox/idea.md"),
            preview: Some("An idea".to_string()),
            outcome: Outcome::Promoted {
                category: Category::Fleeting,
            },
        });

        let text = render_summary(&summary);
        assert!(text.contains("(dry run)"));
        assert!(text.contains("promoted=1"));
        assert!(text.contains("PROMOTE idea.md -> Fleeting Notes | An idea"));
    }
}

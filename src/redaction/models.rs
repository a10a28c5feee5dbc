//! Entity span and redaction outcome models

use crate::domain::Category;
use serde::{Deserialize, Serialize};

/// Unit in which a detector reports span offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetUnit {
    /// UTF-8 byte offsets (Rust string indices)
    #[default]
    Byte,
    /// Unicode scalar value offsets (what most NER models report)
    Char,
}

/// A detector's claim that `text[start..end]` belongs to a category
///
/// Offsets are half-open and optional: when a detector supplies none, the
/// redactor falls back to replacing the first literal occurrence of `text`.
/// Field names follow the common NER output shape
/// (`{"label", "text", "start", "end", "score"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Category of the matched text
    #[serde(rename = "label")]
    pub category: Category,
    /// The matched substring
    pub text: String,
    /// Start offset, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// End offset, exclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    /// Detection confidence (0.0 - 1.0)
    #[serde(default = "default_score")]
    pub score: f32,
}

fn default_score() -> f32 {
    1.0
}

impl EntitySpan {
    /// Create a span without positional data
    pub fn new(category: impl Into<Category>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
            start: None,
            end: None,
            score: default_score(),
        }
    }

    /// Create a span with offsets
    pub fn with_position(
        category: impl Into<Category>,
        text: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::new(category, text)
        }
    }

    /// Set the confidence score
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score.clamp(0.0, 1.0);
        self
    }

    /// Both offsets, when the detector supplied both
    pub fn offsets(&self) -> Option<(usize, usize)> {
        self.start.zip(self.end)
    }

    /// Length of the offset range, if positioned
    pub fn span_len(&self) -> Option<usize> {
        self.offsets().map(|(start, end)| end.saturating_sub(start))
    }
}

/// One replacement that was spliced into the text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedReplacement {
    /// Index of the span in the input list
    pub span_index: usize,
    /// Category of the span
    pub category: Category,
    /// Text that was replaced
    pub original: String,
    /// Text that took its place, after case adjustment
    pub replacement: String,
    /// Byte offsets in the original text, when the span was positioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// End of the replaced range in the original text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

/// Why a span was not applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The span overlaps a span that won overlap resolution
    Overlap {
        /// Index of the winning span
        kept: usize,
    },
    /// An offset-less span whose text does not occur in the unit
    NotFound,
}

/// A span that was left out of the rewrite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSpan {
    /// Index of the span in the input list
    pub span_index: usize,
    /// Category of the span
    pub category: Category,
    /// Why it was skipped
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Result of applying spans to one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactedText {
    /// The rewritten text
    pub text: String,
    /// Replacements in the order they were applied
    pub replacements: Vec<AppliedReplacement>,
    /// Spans that were not applied
    pub skipped: Vec<SkippedSpan>,
}

impl RedactedText {
    /// Text returned unchanged
    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            replacements: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Number of spliced replacements
    pub fn replacement_count(&self) -> usize {
        self.replacements.len()
    }
}

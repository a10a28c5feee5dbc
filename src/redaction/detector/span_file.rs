//! Precomputed span detector
//!
//! Replays entity lists produced ahead of time by an external NER model.
//! The file is a JSON object keyed by the exact text of each unit:
//!
//! ```json
//! {
//!   "Contact Jane Doe at jane@x.com": [
//!     {"label": "name", "text": "Jane Doe", "start": 8, "end": 16, "score": 0.94}
//!   ]
//! }
//! ```
//!
//! Offsets are character offsets unless configured otherwise, matching what
//! Python-based models emit.

use super::EntityDetector;
use crate::domain::{Result, VeilError};
use crate::redaction::models::{EntitySpan, OffsetUnit};
use crate::redaction::selector::ActiveCategories;
use std::collections::HashMap;
use std::path::Path;

/// Detector backed by a map of unit text to precomputed spans
#[derive(Debug, Clone, Default)]
pub struct SpanFileDetector {
    entries: HashMap<String, Vec<EntitySpan>>,
    offset_unit: OffsetUnit,
}

impl SpanFileDetector {
    /// Build a detector from an in-memory map, with character offsets
    pub fn new(entries: HashMap<String, Vec<EntitySpan>>) -> Self {
        Self {
            entries,
            offset_unit: OffsetUnit::Char,
        }
    }

    /// Parse a span file from JSON content
    pub fn from_json(content: &str) -> Result<Self> {
        let entries: HashMap<String, Vec<EntitySpan>> = serde_json::from_str(content)
            .map_err(|e| VeilError::Detection(format!("Invalid span file: {e}")))?;
        Ok(Self::new(entries))
    }

    /// Load a span file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            VeilError::Detection(format!("Failed to read span file {}: {e}", path.display()))
        })?;
        let detector = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            units = detector.entries.len(),
            "Loaded precomputed spans"
        );
        Ok(detector)
    }

    /// Override the offset unit of the stored spans
    pub fn with_offset_unit(mut self, unit: OffsetUnit) -> Self {
        self.offset_unit = unit;
        self
    }

    /// Number of unit texts with stored spans
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no spans are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntityDetector for SpanFileDetector {
    fn detect(
        &self,
        text: &str,
        categories: &ActiveCategories,
        threshold: f32,
    ) -> Result<Vec<EntitySpan>> {
        let Some(spans) = self.entries.get(text) else {
            return Ok(Vec::new());
        };

        Ok(spans
            .iter()
            .filter(|s| s.score >= threshold && categories.contains(s.category.as_str()))
            .cloned()
            .collect())
    }

    fn offset_unit(&self) -> OffsetUnit {
        self.offset_unit
    }

    fn name(&self) -> &'static str {
        "span-file"
    }
}

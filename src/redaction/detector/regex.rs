//! Regex-based entity detector

use super::{patterns::PatternRegistry, EntityDetector};
use crate::domain::Result;
use crate::redaction::models::{EntitySpan, OffsetUnit};
use crate::redaction::selector::ActiveCategories;
use std::path::Path;
use std::sync::Arc;

/// Regex-based entity detector
///
/// Covers the categories that have a reliable surface form (emails, phone
/// numbers, SSNs, card numbers, dates, times, amounts, rates, ZIP codes).
/// Free-text categories such as names need a model-backed detector.
#[derive(Debug, Clone)]
pub struct RegexDetector {
    pattern_registry: Arc<PatternRegistry>,
}

impl RegexDetector {
    /// Create a new regex detector with the built-in patterns
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(PatternRegistry::default_patterns()?))
    }

    /// Create a regex detector from a user pattern library file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::with_registry(PatternRegistry::from_file(path)?))
    }

    /// Create a new regex detector with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
        }
    }

    /// The compiled patterns in use
    pub fn registry(&self) -> &PatternRegistry {
        &self.pattern_registry
    }
}

impl EntityDetector for RegexDetector {
    fn detect(
        &self,
        text: &str,
        categories: &ActiveCategories,
        threshold: f32,
    ) -> Result<Vec<EntitySpan>> {
        let mut spans = Vec::new();

        for pattern in self.pattern_registry.all_patterns() {
            if pattern.confidence < threshold || !categories.contains(pattern.category.as_str()) {
                continue;
            }

            for matched in pattern.regex.find_iter(text) {
                spans.push(
                    EntitySpan::with_position(
                        pattern.category.clone(),
                        matched.as_str(),
                        matched.start(),
                        matched.end(),
                    )
                    .with_score(pattern.confidence),
                );
            }
        }

        spans.sort_by_key(|s| (s.start, s.end));
        Ok(spans)
    }

    fn offset_unit(&self) -> OffsetUnit {
        OffsetUnit::Byte
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

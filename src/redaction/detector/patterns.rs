//! Pattern library for the regex detector

use crate::domain::{Category, Result, VeilError};
use crate::redaction::taxonomy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this group
    pub patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Taxonomy category of every match
    pub category: String,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Name of the TOML table the pattern came from
    pub name: String,
    /// Compiled regex
    pub regex: Regex,
    /// Category of matches
    pub category: Category,
    /// Confidence score
    pub confidence: f32,
}

#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: BTreeMap<String, PatternDefinition>,
}

/// Compiled patterns, ordered by table name
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
    by_category: HashMap<Category, Vec<usize>>,
}

impl PatternRegistry {
    /// Load a pattern library from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            VeilError::Configuration(format!(
                "Failed to read pattern library {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Build a registry from TOML content
    ///
    /// Every pattern's category must exist in the taxonomy and every regex
    /// must compile; the first failure names the offending table.
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content).map_err(|e| {
            VeilError::Configuration(format!("Failed to parse pattern library TOML: {e}"))
        })?;

        let mut patterns = Vec::new();
        let mut by_category: HashMap<Category, Vec<usize>> = HashMap::new();

        for (name, def) in library.patterns {
            if !taxonomy::is_valid(&def.category) {
                return Err(VeilError::Configuration(format!(
                    "Invalid category in pattern '{name}': {}",
                    def.category
                )));
            }
            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(VeilError::Configuration(format!(
                    "Confidence for pattern '{name}' must be between 0.0 and 1.0, got {}",
                    def.confidence
                )));
            }

            let category = Category::new(def.category);
            for source in &def.patterns {
                let regex = Regex::new(source).map_err(|e| {
                    VeilError::Configuration(format!("Invalid regex in pattern '{name}': {e}"))
                })?;

                by_category
                    .entry(category.clone())
                    .or_default()
                    .push(patterns.len());
                patterns.push(CompiledPattern {
                    name: name.clone(),
                    regex,
                    category: category.clone(),
                    confidence: def.confidence,
                });
            }
        }

        Ok(Self {
            patterns,
            by_category,
        })
    }

    /// Built-in pattern library
    pub fn default_patterns() -> Result<Self> {
        Self::from_toml(include_str!("../../../patterns/default_patterns.toml"))
    }

    /// Get all patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Get patterns for a specific category
    pub fn patterns_for_category(&self, category: &str) -> Vec<&CompiledPattern> {
        self.by_category
            .get(category)
            .map(|indices| indices.iter().map(|&i| &self.patterns[i]).collect())
            .unwrap_or_default()
    }

    /// Categories covered by at least one pattern
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.by_category.keys().collect();
        categories.sort();
        categories
    }
}

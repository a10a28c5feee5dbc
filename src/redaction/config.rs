//! Redaction configuration
//!
//! Settings sections consumed by the engine (`[detection]`, `[selection]`,
//! `[synthesis]`, `[audit]`) and the resolved per-run [`RunConfig`].

use crate::domain::{Result, VeilError};
use crate::redaction::selector::{ActiveCategories, CategorySelection};
use crate::redaction::synthesizer::ReplacementStrategy;
use crate::redaction::taxonomy::Group;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default detection threshold for report runs
pub const DEFAULT_DETECT_THRESHOLD: f32 = 0.5;

/// Default detection threshold for replace runs
///
/// Lower than the report threshold: a false positive only costs a cosmetic
/// replacement, a missed entity leaks.
pub const DEFAULT_REPLACE_THRESHOLD: f32 = 0.3;

/// What a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Detect and report; the document is not modified
    Report,
    /// Rewrite the document with replacements
    Replace,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => write!(f, "report"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// Detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Threshold for report runs
    #[serde(default = "default_detect_threshold")]
    pub detect_threshold: f32,

    /// Threshold for replace runs
    #[serde(default = "default_replace_threshold")]
    pub replace_threshold: f32,

    /// Path to a pattern library TOML file replacing the built-in patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_library: Option<PathBuf>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            detect_threshold: DEFAULT_DETECT_THRESHOLD,
            replace_threshold: DEFAULT_REPLACE_THRESHOLD,
            pattern_library: None,
        }
    }
}

impl DetectionConfig {
    /// Threshold configured for `mode`
    pub fn threshold_for(&self, mode: OutputMode) -> f32 {
        match mode {
            OutputMode::Report => self.detect_threshold,
            OutputMode::Replace => self.replace_threshold,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        check_threshold("detection.detect_threshold", self.detect_threshold)?;
        check_threshold("detection.replace_threshold", self.replace_threshold)?;

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(format!("Pattern library file not found: {}", path.display()));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

/// Default category selection for runs that pass none on the command line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Explicit category tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    /// Predefined group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
}

impl SelectionConfig {
    /// Convert to a [`CategorySelection`]
    ///
    /// # Errors
    ///
    /// [`VeilError::ConflictingSelection`] when both fields are set.
    pub fn to_selection(&self) -> Result<CategorySelection> {
        let groups: Vec<Group> = self.group.into_iter().collect();
        CategorySelection::from_parts(self.categories.clone(), &groups)
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.to_selection()
            .and_then(|selection| crate::redaction::selector::resolve(&selection))
            .map(|_| ())
            .map_err(|e| format!("selection: {e}"))
    }
}

/// Replacement value settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// How replacement values are produced
    #[serde(default)]
    pub strategy: ReplacementStrategy,

    /// Fixed RNG seed for reproducible output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Audit logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path must be set when audit logging is enabled".to_string());
        }
        Ok(())
    }
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Active categories (never empty)
    pub categories: ActiveCategories,
    /// Detection confidence threshold
    pub threshold: f32,
    /// Report or replace
    pub mode: OutputMode,
}

impl RunConfig {
    /// Create a run configuration with the default threshold for `mode`
    pub fn new(categories: ActiveCategories, mode: OutputMode) -> Self {
        let threshold = match mode {
            OutputMode::Report => DEFAULT_DETECT_THRESHOLD,
            OutputMode::Replace => DEFAULT_REPLACE_THRESHOLD,
        };
        Self {
            categories,
            threshold,
            mode,
        }
    }

    /// Set the detection threshold
    ///
    /// # Errors
    ///
    /// [`VeilError::Configuration`] for a threshold outside `[0.0, 1.0]`.
    pub fn with_threshold(mut self, threshold: f32) -> Result<Self> {
        check_threshold("threshold", threshold).map_err(VeilError::Configuration)?;
        self.threshold = threshold;
        Ok(self)
    }
}

fn check_threshold(name: &str, value: f32) -> std::result::Result<(), String> {
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{name} must be between 0.0 and 1.0, got {value}"));
    }
    Ok(())
}

fn default_detect_threshold() -> f32 {
    DEFAULT_DETECT_THRESHOLD
}

fn default_replace_threshold() -> f32 {
    DEFAULT_REPLACE_THRESHOLD
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/veil_audit.log")
}

fn default_audit_json_format() -> bool {
    true
}

//! Audit logger for replace runs

use crate::domain::{Result, TextUnitId, VeilError};
use crate::redaction::models::RedactedText;
use crate::redaction::synthesizer::ReplacementStrategy;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Audit log entry for one rewritten text unit
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    run_id: String,
    document: String,
    unit: TextUnitId,
    strategy: ReplacementStrategy,
    replacements_count: usize,
    skipped_count: usize,
    replacements: Vec<AuditReplacement>,
}

/// Audit replacement entry (with hashed original)
#[derive(Debug, Serialize)]
struct AuditReplacement {
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<usize>,
    /// SHA-256 hash of original value (never log plaintext PII)
    value_hash: String,
}

/// Audit logger for replace runs
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    VeilError::Io(format!(
                        "Failed to create audit log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// A logger that records nothing
    pub fn disabled() -> Self {
        Self {
            log_path: PathBuf::new(),
            json_format: true,
            enabled: false,
        }
    }

    /// Whether entries are written
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log the replacements applied to one text unit
    pub fn log_unit(
        &self,
        run_id: Uuid,
        document: &str,
        unit: TextUnitId,
        strategy: ReplacementStrategy,
        redacted: &RedactedText,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            run_id: run_id.to_string(),
            document: document.to_string(),
            unit,
            strategy,
            replacements_count: redacted.replacements.len(),
            skipped_count: redacted.skipped.len(),
            replacements: redacted
                .replacements
                .iter()
                .map(|r| AuditReplacement {
                    category: r.category.to_string(),
                    start: r.start,
                    end: r.end,
                    value_hash: hash_value(&r.original),
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                VeilError::Io(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        if self.json_format {
            let json_line = serde_json::to_string(entry)?;
            writeln!(file, "{json_line}")?;
        } else {
            let categories: Vec<&str> = entry
                .replacements
                .iter()
                .map(|r| r.category.as_str())
                .collect();
            writeln!(
                file,
                "[{}] Run: {} | Document: {} | Unit: {} | Strategy: {} | Replacements: {} [{}] | Skipped: {}",
                entry.timestamp,
                entry.run_id,
                entry.document,
                entry.unit,
                entry.strategy,
                entry.replacements_count,
                categories.join(", "),
                entry.skipped_count
            )?;
        }

        Ok(())
    }
}

/// Hash a sensitive value using SHA-256
pub fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

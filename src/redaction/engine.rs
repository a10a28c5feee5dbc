//! Redaction engine
//!
//! This module provides the [`RedactionEngine`] that runs a detector over
//! the text units of a document and either reports what it found or
//! rewrites the document.
//!
//! # Architecture
//!
//! The engine coordinates three components:
//! - **Detector**: any [`EntityDetector`], consulted once per text unit
//! - **Redactor**: [`SpanRedactor`] splicing synthesized values into text
//! - **Audit Logger**: records replacements with hashed originals
//!
//! Detector output is normalized to byte offsets and validated before use.
//! In report runs a malformed span list only skips its unit with a warning;
//! in replace runs it aborts the run before anything is saved.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use veil::document::PlainTextDocument;
//! use veil::redaction::config::{OutputMode, RunConfig};
//! use veil::redaction::detector::RegexDetector;
//! use veil::redaction::selector::{resolve, CategorySelection};
//! use veil::redaction::synthesizer::{ReplacementStrategy, Synthesizer};
//! use veil::redaction::RedactionEngine;
//!
//! # fn example() -> veil::domain::Result<()> {
//! let engine = RedactionEngine::new(
//!     Arc::new(RegexDetector::new()?),
//!     Synthesizer::new(ReplacementStrategy::Redact),
//! );
//! let config = RunConfig::new(resolve(&CategorySelection::All)?, OutputMode::Report);
//! let document = PlainTextDocument::parse("Reach me at jane@x.com\n");
//!
//! let report = engine.report(&document, "inline", &config, true)?;
//! assert_eq!(report.summary.total_instances, 1);
//! assert_eq!(
//!     report.findings[0].redacted.as_deref(),
//!     Some("Reach me at [EMAIL_ADDRESS]")
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::document::Document;
use crate::domain::{Result, VeilError};
use crate::redaction::audit::AuditLogger;
use crate::redaction::config::{DetectionConfig, RunConfig};
use crate::redaction::detector::{EntityDetector, RegexDetector, SpanFileDetector};
use crate::redaction::models::{EntitySpan, RedactedText};
use crate::redaction::redactor::{self, SpanRedactor};
use crate::redaction::report::RunReport;
use crate::redaction::synthesizer::Synthesizer;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Main redaction engine
///
/// # Thread Safety
///
/// The engine holds no per-run state. It can be shared across threads with
/// `Arc`; the synthesizer serializes access to its random source internally.
pub struct RedactionEngine {
    detector: Arc<dyn EntityDetector>,
    synthesizer: Synthesizer,
    audit_logger: AuditLogger,
}

impl RedactionEngine {
    /// Create an engine from a detector and a synthesizer
    pub fn new(detector: Arc<dyn EntityDetector>, synthesizer: Synthesizer) -> Self {
        Self {
            detector,
            synthesizer,
            audit_logger: AuditLogger::disabled(),
        }
    }

    /// Attach an audit logger for replace runs
    pub fn with_audit_logger(mut self, audit_logger: AuditLogger) -> Self {
        self.audit_logger = audit_logger;
        self
    }

    /// The detector in use
    pub fn detector(&self) -> &dyn EntityDetector {
        self.detector.as_ref()
    }

    /// The synthesizer in use
    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synthesizer
    }

    /// Detect entities in one text, with offsets converted to bytes
    ///
    /// # Errors
    ///
    /// Detector failures, and [`VeilError::InvalidSpan`] for character
    /// offsets past the end of `text`.
    pub fn detect_text(&self, text: &str, config: &RunConfig) -> Result<Vec<EntitySpan>> {
        let spans = self
            .detector
            .detect(text, &config.categories, config.threshold)?;
        let spans = redactor::to_byte_offsets(text, &spans, self.detector.offset_unit())?;
        Ok(spans.into_owned())
    }

    /// Detect and redact one text
    pub fn redact_text(&self, text: &str, config: &RunConfig) -> Result<RedactedText> {
        let spans = self.detect_text(text, config)?;
        SpanRedactor::new(&self.synthesizer).apply(text, &spans)
    }

    /// Scan a document and report findings without modifying it
    ///
    /// With `preview` set, each finding carries the redacted text of its
    /// unit. Units whose spans fail validation are skipped with a warning.
    pub fn report<D>(
        &self,
        document: &D,
        name: &str,
        config: &RunConfig,
        preview: bool,
    ) -> Result<RunReport>
    where
        D: Document + ?Sized,
    {
        let start = Instant::now();
        let mut report =
            RunReport::new(name, config).with_offset_unit(self.detector.offset_unit());
        let units = document.units();
        report.total_elements = units.len();

        tracing::info!(
            run_id = %report.run_id,
            document = name,
            detector = self.detector.name(),
            categories = config.categories.len(),
            threshold = config.threshold,
            units = units.len(),
            "Starting detection run"
        );

        let redactor = SpanRedactor::new(&self.synthesizer);
        for unit in units {
            // Findings keep the detector's own offsets; splicing needs bytes.
            let detected = self
                .detector
                .detect(&unit.text, &config.categories, config.threshold)
                .and_then(|reported| {
                    let spans = redactor::to_byte_offsets(
                        &unit.text,
                        &reported,
                        self.detector.offset_unit(),
                    )?
                    .into_owned();
                    redactor::validate_spans(&unit.text, &spans)?;
                    Ok((reported, spans))
                });
            let (reported, spans) = match detected {
                Ok(detected) => detected,
                Err(e @ VeilError::InvalidSpan { .. }) => {
                    tracing::warn!(unit = %unit.id, error = %e, "Skipping unit with malformed spans");
                    report.add_warning(format!("Skipped {}: {e}", unit.id));
                    continue;
                }
                Err(e) => return Err(e),
            };

            if spans.is_empty() {
                continue;
            }

            let redacted = if preview {
                Some(redactor.apply(&unit.text, &spans)?.text)
            } else {
                None
            };

            tracing::debug!(unit = %unit.id, entities = spans.len(), "Entities detected");
            report.add_finding(unit.id, &unit.text, reported, redacted);
        }

        tracing::info!(
            run_id = %report.run_id,
            findings = report.findings.len(),
            instances = report.summary.total_instances,
            warnings = report.warnings.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Detection run complete"
        );

        Ok(report)
    }

    /// Rewrite every unit of a document and save it to `output`
    ///
    /// Only units whose text changes are written back. The reported
    /// replacement count is the number of detected entities in changed
    /// units.
    ///
    /// # Errors
    ///
    /// Any detector, span, or document error aborts the run; the output file
    /// is not written in that case.
    pub fn replace<D>(
        &self,
        document: &mut D,
        name: &str,
        config: &RunConfig,
        output: &Path,
    ) -> Result<RunReport>
    where
        D: Document + ?Sized,
    {
        let start = Instant::now();
        let mut report =
            RunReport::new(name, config).with_offset_unit(self.detector.offset_unit());
        let units = document.units();
        report.total_elements = units.len();

        tracing::info!(
            run_id = %report.run_id,
            document = name,
            detector = self.detector.name(),
            strategy = %self.synthesizer.strategy(),
            categories = config.categories.len(),
            threshold = config.threshold,
            units = units.len(),
            "Starting replacement run"
        );

        let redactor = SpanRedactor::new(&self.synthesizer);
        for unit in units {
            let spans = self.detect_text(&unit.text, config)?;
            if spans.is_empty() {
                continue;
            }

            let redacted = redactor.apply(&unit.text, &spans).map_err(|e| {
                tracing::error!(unit = %unit.id, error = %e, "Aborting replacement run");
                e
            })?;

            if redacted.text != unit.text {
                document.set_text(&unit.id, redacted.text.clone())?;
                report.replacements_made += spans.len();
                self.audit_logger.log_unit(
                    report.run_id,
                    name,
                    unit.id,
                    self.synthesizer.strategy(),
                    &redacted,
                )?;
            }

            for skipped in &redacted.skipped {
                tracing::debug!(
                    unit = %unit.id,
                    span_index = skipped.span_index,
                    category = %skipped.category,
                    "Span not applied"
                );
            }

            report.add_finding(unit.id, &unit.text, spans, Some(redacted.text));
        }

        document.save(output)?;
        report.output_path = Some(output.to_path_buf());

        tracing::info!(
            run_id = %report.run_id,
            replacements = report.replacements_made,
            output = %output.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Replacement run complete"
        );

        Ok(report)
    }
}

impl std::fmt::Debug for RedactionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedactionEngine")
            .field("detector", &self.detector.name())
            .field("synthesizer", &self.synthesizer)
            .field("audit", &self.audit_logger.is_enabled())
            .finish()
    }
}

/// Build the detector for a run
///
/// A span file takes precedence; otherwise the regex detector uses the
/// configured pattern library or the built-in patterns.
pub fn build_detector(
    detection: &DetectionConfig,
    span_file: Option<&Path>,
) -> Result<Arc<dyn EntityDetector>> {
    if let Some(path) = span_file {
        return Ok(Arc::new(SpanFileDetector::from_file(path)?));
    }

    match detection.pattern_library {
        Some(ref path) => Ok(Arc::new(RegexDetector::from_file(path)?)),
        None => Ok(Arc::new(RegexDetector::new()?)),
    }
}

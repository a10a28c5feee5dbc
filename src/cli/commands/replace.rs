//! Replace command implementation
//!
//! Rewrites a document with synthetic values in place of detected entities
//! and saves the result next to the input unless `--output` is given.

use super::{report_error, run_config, SelectionArgs};
use crate::config::VeilConfig;
use crate::document::{anonymized_path, PlainTextDocument};
use crate::log_run_summary;
use crate::redaction::audit::AuditLogger;
use crate::redaction::engine::build_detector;
use crate::redaction::synthesizer::ReplacementStrategy;
use crate::redaction::{OutputMode, RedactionEngine, Synthesizer};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the replace command
#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Document to rewrite
    pub input: PathBuf,

    /// Output path (defaults to <stem>_anonymized.<ext> next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum detection confidence (defaults to detection.replace_threshold)
    #[arg(short, long)]
    pub threshold: Option<f32>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Replacement strategy (synthetic, static, redact)
    #[arg(long)]
    pub strategy: Option<ReplacementStrategy>,

    /// Seed for reproducible synthetic values
    #[arg(long)]
    pub seed: Option<u64>,

    /// Precomputed detections (JSON) to use instead of the built-in patterns
    #[arg(long, value_name = "FILE")]
    pub detections: Option<PathBuf>,
}

impl ReplaceArgs {
    /// Execute the replace command
    pub async fn execute(&self, config: &VeilConfig) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting replace command");

        let run = match run_config(&self.selection, self.threshold, OutputMode::Replace, config) {
            Ok(run) => run,
            Err(e) => return Ok(report_error("Invalid category selection", &e)),
        };

        let detector = match build_detector(&config.detection, self.detections.as_deref()) {
            Ok(d) => d,
            Err(e) => return Ok(report_error("Failed to initialize detector", &e)),
        };

        let audit_logger = match AuditLogger::new(
            config.audit.log_path.clone(),
            config.audit.json_format,
            config.audit.enabled,
        ) {
            Ok(l) => l,
            Err(e) => return Ok(report_error("Failed to initialize audit log", &e)),
        };

        let mut document = match PlainTextDocument::open(&self.input) {
            Ok(d) => d,
            Err(e) => return Ok(report_error("Failed to open document", &e)),
        };

        let strategy = self.strategy.unwrap_or(config.synthesis.strategy);
        let seed = self.seed.or(config.synthesis.seed);
        let synthesizer = Synthesizer::from_seed(strategy, seed);
        let engine = RedactionEngine::new(detector, synthesizer).with_audit_logger(audit_logger);

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| anonymized_path(&self.input));
        let name = self.input.display().to_string();

        let report = match engine.replace(&mut document, &name, &run, &output) {
            Ok(r) => r,
            Err(e) => {
                println!("   No output was written");
                return Ok(report_error("Replacement failed", &e));
            }
        };
        log_run_summary!(&report);

        println!("{}", report.format_summary());
        println!(
            "✅ {} replacement(s) written to {}",
            report.replacements_made,
            output.display()
        );

        Ok(0)
    }
}

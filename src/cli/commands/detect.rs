//! Detect command implementation
//!
//! Scans a document and reports sensitive data. The document is never
//! modified.

use super::{report_error, run_config, SelectionArgs};
use crate::config::VeilConfig;
use crate::document::PlainTextDocument;
use crate::log_run_summary;
use crate::redaction::engine::build_detector;
use crate::redaction::report::ReportFormat;
use crate::redaction::synthesizer::ReplacementStrategy;
use crate::redaction::{OutputMode, RedactionEngine, Synthesizer};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Document to scan
    pub input: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Minimum detection confidence (defaults to detection.detect_threshold)
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Summary)]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Precomputed detections (JSON) to use instead of the built-in patterns
    #[arg(long, value_name = "FILE")]
    pub detections: Option<PathBuf>,
}

impl DetectArgs {
    /// Execute the detect command
    pub async fn execute(&self, config: &VeilConfig) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), format = %self.format, "Starting detect command");

        let run = match run_config(&self.selection, self.threshold, OutputMode::Report, config) {
            Ok(run) => run,
            Err(e) => return Ok(report_error("Invalid category selection", &e)),
        };

        let detector = match build_detector(&config.detection, self.detections.as_deref()) {
            Ok(d) => d,
            Err(e) => return Ok(report_error("Failed to initialize detector", &e)),
        };

        let document = match PlainTextDocument::open(&self.input) {
            Ok(d) => d,
            Err(e) => return Ok(report_error("Failed to open document", &e)),
        };

        // Previews always use placeholders so detect output never contains synthetic look-alikes
        let engine = RedactionEngine::new(detector, Synthesizer::new(ReplacementStrategy::Redact));
        let name = self.input.display().to_string();
        let preview = self.format == ReportFormat::Redacted;

        let report = match engine.report(&document, &name, &run, preview) {
            Ok(r) => r,
            Err(e) => return Ok(report_error("Detection failed", &e)),
        };
        log_run_summary!(&report);

        match self.output {
            Some(ref path) => {
                let rendered = report.render(self.format)?;
                std::fs::write(path, rendered)?;
                println!("✅ Report written to {}", path.display());
            }
            None => println!("{}", report.render(self.format)?),
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(input: PathBuf, format: ReportFormat, output: Option<PathBuf>) -> DetectArgs {
        DetectArgs {
            input,
            selection: SelectionArgs::default(),
            threshold: None,
            format,
            output,
            detections: None,
        }
    }

    #[tokio::test]
    async fn test_detect_writes_json_report() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "Call 555-123-4567 or mail jane@x.com\n").unwrap();
        let output = dir.path().join("report.json");

        let code = args(input.clone(), ReportFormat::Json, Some(output.clone()))
            .execute(&VeilConfig::default())
            .await
            .unwrap();

        assert_eq!(code, 0);
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["summary"]["total_instances"], 2);
        // Input is untouched
        assert_eq!(
            std::fs::read_to_string(&input).unwrap(),
            "Call 555-123-4567 or mail jane@x.com\n"
        );
    }

    #[tokio::test]
    async fn test_detect_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let code = args(dir.path().join("missing.txt"), ReportFormat::Summary, None)
            .execute(&VeilConfig::default())
            .await
            .unwrap();
        assert_eq!(code, super::super::EXIT_FATAL);
    }

    #[tokio::test]
    async fn test_detect_unknown_category_is_config_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "nothing here\n").unwrap();

        let mut detect = args(input, ReportFormat::Summary, None);
        detect.selection.categories = Some(vec!["phone_numbr".to_string()]);

        let code = detect.execute(&VeilConfig::default()).await.unwrap();
        assert_eq!(code, super::super::EXIT_CONFIG_ERROR);
    }
}

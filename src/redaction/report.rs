//! Run reporting
//!
//! A [`RunReport`] collects per-unit findings and renders them as a console
//! summary, a redacted preview, or JSON.

use crate::domain::{Category, Result, TextUnitId};
use crate::redaction::config::{OutputMode, RunConfig};
use crate::redaction::models::{EntitySpan, OffsetUnit};
use crate::redaction::selector::ActiveCategories;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

const RULE_HEAVY: &str = "═══════════════════════════════════════════════════════════════\n";
const RULE_LIGHT: &str = "───────────────────────────────────────────────────────────────\n";

/// Unique values listed per category in the console summary
const SUMMARY_SAMPLE_LIMIT: usize = 5;

/// Report rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Counts and sample values per category
    #[default]
    Summary,
    /// Full report as pretty JSON
    Json,
    /// Redacted text of every unit with findings
    Redacted,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Redacted => write!(f, "redacted"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "redacted" => Ok(Self::Redacted),
            _ => Err(format!(
                "Invalid report format '{s}'. Must be one of: summary, json, redacted"
            )),
        }
    }
}

/// Entities found in one text unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitFinding {
    /// Where the unit lives
    #[serde(flatten)]
    pub unit: TextUnitId,
    /// Original unit text
    pub text: String,
    /// Detected entities, offsets in the report's `offset_unit`
    pub entities: Vec<EntitySpan>,
    /// Redacted preview, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redacted: Option<String>,
}

/// Aggregate counts over all findings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total entity instances
    pub total_instances: usize,
    /// Matched values per category, in detection order
    pub by_category: BTreeMap<Category, Vec<String>>,
}

impl ReportSummary {
    /// Distinct values for a category, first-seen order
    pub fn unique_values(&self, category: &str) -> Vec<&str> {
        let mut unique: Vec<&str> = Vec::new();
        if let Some(values) = self.by_category.get(category) {
            for value in values {
                if !unique.contains(&value.as_str()) {
                    unique.push(value);
                }
            }
        }
        unique
    }
}

/// Report of one detect or replace run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier
    pub run_id: Uuid,
    /// Input document path
    pub document: String,
    /// Report or replace
    pub mode: OutputMode,
    /// Active categories
    pub categories: ActiveCategories,
    /// Detection threshold used
    pub threshold: f32,
    /// Start time of the run
    pub started_at: DateTime<Utc>,
    /// Non-blank text units scanned
    pub total_elements: usize,
    /// Unit of the offsets recorded in findings, as the detector reported them
    #[serde(default)]
    pub offset_unit: OffsetUnit,
    /// Units with at least one finding
    pub findings: Vec<UnitFinding>,
    /// Aggregate counts
    pub summary: ReportSummary,
    /// Entities replaced in changed units (replace mode)
    pub replacements_made: usize,
    /// Where the rewritten document was saved (replace mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Non-fatal problems encountered during the run
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl RunReport {
    /// Create an empty report for a run
    pub fn new(document: impl Into<String>, config: &RunConfig) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            document: document.into(),
            mode: config.mode,
            categories: config.categories.clone(),
            threshold: config.threshold,
            started_at: Utc::now(),
            total_elements: 0,
            offset_unit: OffsetUnit::default(),
            findings: Vec::new(),
            summary: ReportSummary::default(),
            replacements_made: 0,
            output_path: None,
            warnings: Vec::new(),
        }
    }

    /// Set the unit of finding offsets
    pub fn with_offset_unit(mut self, offset_unit: OffsetUnit) -> Self {
        self.offset_unit = offset_unit;
        self
    }

    /// Record the entities found in one unit
    ///
    /// Units without entities are not recorded.
    pub fn add_finding(
        &mut self,
        unit: TextUnitId,
        text: &str,
        entities: Vec<EntitySpan>,
        redacted: Option<String>,
    ) {
        if entities.is_empty() {
            return;
        }

        self.summary.total_instances += entities.len();
        for entity in &entities {
            self.summary
                .by_category
                .entry(entity.category.clone())
                .or_default()
                .push(entity.text.clone());
        }

        self.findings.push(UnitFinding {
            unit,
            text: text.to_string(),
            entities,
            redacted,
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Render in the requested format
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        Ok(match format {
            ReportFormat::Summary => self.format_summary(),
            ReportFormat::Json => self.format_json()?,
            ReportFormat::Redacted => self.format_redacted(),
        })
    }

    /// Format report for console output
    pub fn format_summary(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE_HEAVY);
        output.push_str("                    SENSITIVE DATA SUMMARY                     \n");
        output.push_str(RULE_HEAVY);
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str(RULE_LIGHT);
        output.push_str(&format!("  Document:                 {}\n", self.document));
        output.push_str(&format!("  Mode:                     {}\n", self.mode));
        output.push_str(&format!(
            "  Active Categories:        {}\n",
            self.categories.len()
        ));
        output.push_str(&format!("  Threshold:                {:.2}\n", self.threshold));
        output.push_str(&format!(
            "  Text Elements Scanned:    {}\n",
            self.total_elements
        ));
        output.push_str(&format!(
            "  Elements with Findings:   {}\n",
            self.findings.len()
        ));
        output.push_str(&format!(
            "  Total Instances Found:    {}\n",
            self.summary.total_instances
        ));
        if self.mode == OutputMode::Replace {
            output.push_str(&format!(
                "  Replacements Made:        {}\n",
                self.replacements_made
            ));
            if let Some(ref path) = self.output_path {
                output.push_str(&format!("  Output Document:          {}\n", path.display()));
            }
        }
        output.push('\n');

        if self.summary.by_category.is_empty() {
            output.push_str("  No sensitive data detected with current settings.\n\n");
        } else {
            output.push_str("🔍 FINDINGS BY CATEGORY\n");
            output.push_str(RULE_LIGHT);

            for (category, values) in &self.summary.by_category {
                let unique = self.summary.unique_values(category.as_str());
                output.push_str(&format!("\n  {category}: {} instance(s)\n", values.len()));
                for value in unique.iter().take(SUMMARY_SAMPLE_LIMIT) {
                    output.push_str(&format!("    - {value}\n"));
                }
                if unique.len() > SUMMARY_SAMPLE_LIMIT {
                    output.push_str(&format!(
                        "    ... and {} more unique value(s)\n",
                        unique.len() - SUMMARY_SAMPLE_LIMIT
                    ));
                }
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str(RULE_LIGHT);
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str(RULE_HEAVY);
        output
    }

    /// Format the redacted preview of every unit with findings
    pub fn format_redacted(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE_HEAVY);
        output.push_str("                       REDACTED CONTENT                        \n");
        output.push_str(RULE_HEAVY);

        for finding in &self.findings {
            output.push_str(&format!(
                "\n[{}]\n",
                finding.unit.to_string().to_uppercase()
            ));
            output.push_str(finding.redacted.as_deref().unwrap_or(&finding.text));
            output.push('\n');
        }

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write report to file as JSON
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.format_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::selector::{resolve, CategorySelection};

    fn report() -> RunReport {
        let categories = resolve(&CategorySelection::All).unwrap();
        RunReport::new("notes.txt", &RunConfig::new(categories, OutputMode::Report))
    }

    fn email(text: &str) -> EntitySpan {
        EntitySpan::with_position("email address", text, 0, text.len())
    }

    #[test]
    fn test_empty_report() {
        let report = report();
        assert_eq!(report.summary.total_instances, 0);
        assert!(report.findings.is_empty());
        assert!(report
            .format_summary()
            .contains("No sensitive data detected with current settings."));
    }

    #[test]
    fn test_add_finding_aggregates() {
        let mut report = report();
        report.add_finding(
            TextUnitId::Paragraph { index: 0 },
            "a@x.com b@x.com",
            vec![email("a@x.com"), email("b@x.com")],
            None,
        );
        report.add_finding(TextUnitId::Paragraph { index: 1 }, "nothing", vec![], None);

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.summary.total_instances, 2);
        assert_eq!(report.summary.by_category["email address"].len(), 2);
    }

    #[test]
    fn test_summary_lists_top_five_unique_values() {
        let mut report = report();
        let entities: Vec<EntitySpan> = (0..8)
            .map(|i| email(&format!("user{i}@x.com")))
            .chain(std::iter::once(email("user0@x.com")))
            .collect();
        report.add_finding(TextUnitId::Paragraph { index: 0 }, "...", entities, None);

        let summary = report.format_summary();
        assert!(summary.contains("email address: 9 instance(s)"));
        assert!(summary.contains("    - user4@x.com"));
        assert!(!summary.contains("    - user5@x.com"));
        assert!(summary.contains("... and 3 more unique value(s)"));
    }

    #[test]
    fn test_redacted_format_uses_preview() {
        let mut report = report();
        report.add_finding(
            TextUnitId::TableCell {
                table: 0,
                row: 1,
                column: 2,
            },
            "a@x.com",
            vec![email("a@x.com")],
            Some("[EMAIL_ADDRESS]".to_string()),
        );
        let output = report.format_redacted();
        assert!(output.contains("[TABLE 0 ROW 1 COLUMN 2]"));
        assert!(output.contains("[EMAIL_ADDRESS]"));
    }

    #[test]
    fn test_json_round_trip_and_write() {
        let mut report = report();
        report.total_elements = 3;
        report.add_finding(
            TextUnitId::Paragraph { index: 2 },
            "a@x.com",
            vec![email("a@x.com")],
            None,
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_to_file(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["document"], "notes.txt");
        assert_eq!(value["mode"], "report");
        assert_eq!(value["total_elements"], 3);
        assert_eq!(value["summary"]["total_instances"], 1);
        assert_eq!(value["findings"][0]["element_type"], "paragraph");
        assert_eq!(value["findings"][0]["entities"][0]["label"], "email address");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_warnings_rendered() {
        let mut report = report();
        report.add_warning("Skipped paragraph 3: Invalid span #0: start 5 is after end 2");
        assert!(report.format_summary().contains("⚠️  WARNINGS"));
    }
}

//! End-to-end tests for detect and replace runs over plain-text documents

use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use veil::document::{anonymized_path, Document, PlainTextDocument};
use veil::domain::TextUnitId;
use veil::redaction::audit::AuditLogger;
use veil::redaction::config::DetectionConfig;
use veil::redaction::detector::{RegexDetector, SpanFileDetector};
use veil::redaction::engine::build_detector;
use veil::redaction::selector::{resolve, CategorySelection};
use veil::redaction::taxonomy::Group;
use veil::redaction::{
    EntitySpan, OutputMode, RedactionEngine, ReplacementStrategy, ReportFormat, RunConfig,
    Synthesizer,
};

const NOTES: &str = "\
Patient intake

Name: Jane Doe
Phone: 555-123-4567
Email: jane@x.com

Item\tAmount
Copay\t$40.00
Card\t4111 1111 1111 1111
";

fn run_config(selection: CategorySelection, mode: OutputMode) -> RunConfig {
    RunConfig::new(resolve(&selection).unwrap(), mode)
}

fn regex_engine(strategy: ReplacementStrategy) -> RedactionEngine {
    RedactionEngine::new(
        Arc::new(RegexDetector::new().unwrap()),
        Synthesizer::with_seed(strategy, 17),
    )
}

#[test]
fn test_report_does_not_modify_document() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, NOTES).unwrap();

    let document = PlainTextDocument::open(&input).unwrap();
    let engine = regex_engine(ReplacementStrategy::Redact);
    let config = run_config(CategorySelection::All, OutputMode::Report);

    let report = engine.report(&document, "notes.txt", &config, false).unwrap();

    assert_eq!(report.mode, OutputMode::Report);
    assert_eq!(report.summary.total_instances, 5);
    assert_eq!(report.summary.unique_values("email address"), vec!["jane@x.com"]);
    assert!(report.findings.iter().all(|f| f.redacted.is_none()));
    assert_eq!(std::fs::read_to_string(&input).unwrap(), NOTES);
}

#[test]
fn test_group_selection_limits_findings() {
    let document = PlainTextDocument::parse(NOTES);
    let engine = regex_engine(ReplacementStrategy::Redact);
    let config = run_config(CategorySelection::Group(Group::Pci), OutputMode::Report);

    let report = engine.report(&document, "notes", &config, false).unwrap();

    let categories: Vec<&str> = report
        .summary
        .by_category
        .keys()
        .map(|c| c.as_str())
        .collect();
    assert_eq!(categories, vec!["credit card", "money"]);
}

#[test]
fn test_replace_rewrites_paragraphs_and_cells() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, NOTES).unwrap();
    let output = anonymized_path(&input);

    let mut document = PlainTextDocument::open(&input).unwrap();
    let engine = regex_engine(ReplacementStrategy::Redact);
    let config = run_config(CategorySelection::All, OutputMode::Replace);

    let report = engine
        .replace(&mut document, "notes.txt", &config, &output)
        .unwrap();

    assert_eq!(report.replacements_made, 5);
    assert_eq!(report.output_path.as_deref(), Some(output.as_path()));

    let rewritten = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        rewritten,
        "\
Patient intake

Name: Jane Doe
Phone: [PHONE_NUMBER]
Email: [EMAIL_ADDRESS]

Item\tAmount
Copay\t[MONEY]
Card\t[CREDIT_CARD]
"
    );
    assert_eq!(std::fs::read_to_string(&input).unwrap(), NOTES);
}

#[test]
fn test_span_file_drives_name_replacement() {
    let mut entries = HashMap::new();
    entries.insert(
        "Name: Jane Doe".to_string(),
        vec![EntitySpan::with_position("name", "Jane Doe", 6, 14).with_score(0.92)],
    );
    let engine = RedactionEngine::new(
        Arc::new(SpanFileDetector::new(entries)),
        Synthesizer::new(ReplacementStrategy::Static),
    );
    let mut document = PlainTextDocument::parse(NOTES);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = run_config(CategorySelection::All, OutputMode::Replace);

    let report = engine.replace(&mut document, "notes", &config, &output).unwrap();

    assert_eq!(report.replacements_made, 1);
    let units = document.units();
    let name_unit = units
        .iter()
        .find(|u| u.text.starts_with("Name:"))
        .unwrap();
    assert_eq!(name_unit.text, "Name: John Doe");
}

#[test]
fn test_span_file_character_offsets() {
    let text = "Señor José Núñez llamó";
    let json = format!(
        r#"{{"{text}": [{{"label": "name", "text": "José Núñez", "start": 6, "end": 16, "score": 0.9}}]}}"#
    );
    let engine = RedactionEngine::new(
        Arc::new(SpanFileDetector::from_json(&json).unwrap()),
        Synthesizer::new(ReplacementStrategy::Redact),
    );
    let config = run_config(CategorySelection::All, OutputMode::Replace);

    let redacted = engine.redact_text(text, &config).unwrap();
    assert_eq!(redacted.text, "Señor [NAME] llamó");
}

#[test]
fn test_malformed_spans_warn_in_report_and_abort_replace() {
    let mut entries = HashMap::new();
    entries.insert(
        "Name: Jane Doe".to_string(),
        vec![EntitySpan::with_position("name", "Jane Doe", 6, 60)],
    );
    let engine = RedactionEngine::new(
        Arc::new(SpanFileDetector::new(entries)),
        Synthesizer::new(ReplacementStrategy::Redact),
    );

    let document = PlainTextDocument::parse(NOTES);
    let report = engine
        .report(
            &document,
            "notes",
            &run_config(CategorySelection::All, OutputMode::Report),
            true,
        )
        .unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("Invalid span #0"));

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let mut document = PlainTextDocument::parse(NOTES);
    let err = engine
        .replace(
            &mut document,
            "notes",
            &run_config(CategorySelection::All, OutputMode::Replace),
            &output,
        )
        .unwrap_err();
    assert!(matches!(err, veil::domain::VeilError::InvalidSpan { index: 0, .. }));
    assert!(!output.exists());
}

#[test]
fn test_audit_log_hashes_originals() {
    let dir = TempDir::new().unwrap();
    let audit_path = dir.path().join("audit").join("veil_audit.log");
    let logger = AuditLogger::new(audit_path.clone(), true, true).unwrap();
    let engine = regex_engine(ReplacementStrategy::Redact).with_audit_logger(logger);

    let mut document = PlainTextDocument::parse("Reach me at jane@x.com\n");
    let output = dir.path().join("out.txt");
    engine
        .replace(
            &mut document,
            "inline",
            &run_config(CategorySelection::All, OutputMode::Replace),
            &output,
        )
        .unwrap();

    let audit = std::fs::read_to_string(&audit_path).unwrap();
    assert!(!audit.contains("jane@x.com"));
    assert!(audit.contains(&veil::redaction::audit::logger::hash_value("jane@x.com")));
}

#[test]
fn test_build_detector_prefers_span_file() {
    let dir = TempDir::new().unwrap();
    let spans = dir.path().join("spans.json");
    std::fs::write(&spans, "{}").unwrap();

    let detector = build_detector(&DetectionConfig::default(), Some(&spans)).unwrap();
    assert_eq!(detector.name(), "span-file");

    let detector = build_detector(&DetectionConfig::default(), None).unwrap();
    assert_eq!(detector.name(), "regex");
}

#[test]
fn test_report_renderers() {
    let document = PlainTextDocument::parse(NOTES);
    let engine = regex_engine(ReplacementStrategy::Redact);
    let config = run_config(CategorySelection::All, OutputMode::Report);
    let report = engine.report(&document, "notes", &config, true).unwrap();

    let summary = report.render(ReportFormat::Summary).unwrap();
    assert!(summary.contains("SENSITIVE DATA SUMMARY"));
    assert!(summary.contains("phone number: 1 instance(s)"));

    let redacted = report.render(ReportFormat::Redacted).unwrap();
    assert!(redacted.contains("Phone: [PHONE_NUMBER]"));
    assert!(!redacted.contains("555-123-4567"));

    let json: serde_json::Value =
        serde_json::from_str(&report.render(ReportFormat::Json).unwrap()).unwrap();
    assert_eq!(json["summary"]["total_instances"], 5);
    assert_eq!(json["mode"], "report");
}

#[test]
fn test_set_text_on_table_cell() {
    let mut document = PlainTextDocument::parse(NOTES);
    let cell = TextUnitId::TableCell {
        table: 0,
        row: 1,
        column: 1,
    };
    document.set_text(&cell, "$0.00".to_string()).unwrap();
    assert!(document.render().contains("Copay\t$0.00\n"));
}

//! Behavioral tests for the span redactor and replacement synthesizer

use std::sync::Arc;
use std::thread;
use test_case::test_case;
use veil::domain::{Category, VeilError};
use veil::redaction::redactor::SpanRedactor;
use veil::redaction::synthesizer::{ReplacementStrategy, Synthesizer};
use veil::redaction::EntitySpan;

fn spans_for(text: &str, items: &[(&str, &str)]) -> Vec<EntitySpan> {
    items
        .iter()
        .map(|(category, needle)| {
            let start = text.find(needle).expect("needle present");
            EntitySpan::with_position(*category, *needle, start, start + needle.len())
        })
        .collect()
}

/// Segments of `text` outside every span, in order
fn gaps(text: &str, spans: &[EntitySpan]) -> Vec<String> {
    let mut ranges: Vec<(usize, usize)> = spans.iter().filter_map(|s| s.offsets()).collect();
    ranges.sort();
    let mut out = Vec::new();
    let mut cursor = 0;
    for (start, end) in ranges {
        out.push(text[cursor..start].to_string());
        cursor = end;
    }
    out.push(text[cursor..].to_string());
    out
}

#[test_case("" ; "empty text")]
#[test_case("No sensitive data here." ; "plain sentence")]
#[test_case("Ünïcödé – text ✓" ; "multibyte text")]
fn test_no_spans_is_identity(text: &str) {
    let synthesizer = Synthesizer::new(ReplacementStrategy::Synthetic);
    let redactor = SpanRedactor::new(&synthesizer);
    assert_eq!(redactor.redact(text, &[]).unwrap(), text);
}

#[test]
fn test_untouched_regions_are_preserved() {
    let text = "Patient Mary Jones, SSN 123-45-6789, seen 03/14/2024 at St. Luke's.";
    let spans = spans_for(
        text,
        &[
            ("name", "Mary Jones"),
            ("ssn", "123-45-6789"),
            ("date", "03/14/2024"),
        ],
    );
    let synthesizer = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 11);
    let output = SpanRedactor::new(&synthesizer).redact(text, &spans).unwrap();

    let mut cursor = 0;
    for gap in gaps(text, &spans) {
        let found = output[cursor..]
            .find(&gap)
            .unwrap_or_else(|| panic!("gap {gap:?} missing from {output:?}"));
        cursor += found + gap.len();
    }
    assert!(output.starts_with("Patient "));
    assert!(output.ends_with(" at St. Luke's."));
}

#[test]
fn test_input_order_does_not_matter() {
    let text = "A111 B222 C333";
    let ascending = vec![
        EntitySpan::with_position("number", "111", 1, 4),
        EntitySpan::with_position("zip", "222", 6, 9),
        EntitySpan::with_position("pin", "333", 11, 14),
    ];
    let descending: Vec<EntitySpan> = ascending.iter().rev().cloned().collect();

    let synthesizer = Synthesizer::new(ReplacementStrategy::Redact);
    let redactor = SpanRedactor::new(&synthesizer);

    let a = redactor.redact(text, &ascending).unwrap();
    let b = redactor.redact(text, &descending).unwrap();
    assert_eq!(a, "A[NUMBER] B[ZIP] C[PIN]");
    assert_eq!(a, b);
}

#[test]
fn test_all_caps_original_gives_all_caps_replacement() {
    let synthesizer = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 5);
    let spans = vec![EntitySpan::with_position("name", "JOHN SMITH", 0, 10)];
    let output = SpanRedactor::new(&synthesizer)
        .redact("JOHN SMITH", &spans)
        .unwrap();
    assert_eq!(output, output.to_uppercase());
    assert!(!output.is_empty());
}

#[test]
fn test_capitalized_original_capitalizes_first_letter_only() {
    let mut synthesizer = Synthesizer::empty();
    synthesizer.register("name", |_: &mut dyn rand::RngCore| "alice brown".to_string());
    let spans = vec![EntitySpan::with_position("name", "John", 0, 4)];
    let output = SpanRedactor::new(&synthesizer).redact("John", &spans).unwrap();
    assert_eq!(output, "Alice brown");
}

#[test]
fn test_placeholder_fallback() {
    for strategy in [
        ReplacementStrategy::Synthetic,
        ReplacementStrategy::Static,
        ReplacementStrategy::Redact,
    ] {
        let synthesizer = Synthesizer::new(strategy);
        assert_eq!(
            synthesizer.synthesize(&Category::new("unregistered category xyz")),
            "[UNREGISTERED_CATEGORY_XYZ]"
        );
    }
}

#[test]
fn test_contact_scenario() {
    let text = "Contact Jane Doe at jane@x.com";
    let spans = vec![
        EntitySpan::with_position("name", "Jane Doe", 8, 16),
        EntitySpan::with_position("email address", "jane@x.com", 20, 30),
    ];

    let static_values = Synthesizer::new(ReplacementStrategy::Static);
    assert_eq!(
        SpanRedactor::new(&static_values).redact(text, &spans).unwrap(),
        "Contact John Doe at user@example.com"
    );

    let synthetic = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 2024);
    let output = SpanRedactor::new(&synthetic).redact(text, &spans).unwrap();
    assert!(output.starts_with("Contact "));
    let (name, email) = output["Contact ".len()..]
        .split_once(" at ")
        .expect("separator preserved");
    assert!(name.chars().next().is_some_and(char::is_uppercase));
    assert!(email.contains('@'));
}

#[test]
fn test_same_seed_same_output() {
    let text = "Call 555-867-5309 on 04/01/2025";
    let spans = spans_for(text, &[("phone number", "555-867-5309"), ("date", "04/01/2025")]);

    let first = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 99);
    let second = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 99);
    assert_eq!(
        SpanRedactor::new(&first).redact(text, &spans).unwrap(),
        SpanRedactor::new(&second).redact(text, &spans).unwrap()
    );
}

#[test_case(20, 10 ; "reversed range")]
#[test_case(0, 99 ; "end past text")]
fn test_malformed_span_rejects_call(start: usize, end: usize) {
    let text = "short text with twenty+ chars";
    let spans = vec![
        EntitySpan::with_position("name", "short", 0, 5),
        EntitySpan::with_position("name", "bogus", start, end),
    ];
    let synthesizer = Synthesizer::new(ReplacementStrategy::Redact);
    let err = SpanRedactor::new(&synthesizer).redact(text, &spans).unwrap_err();
    assert!(matches!(err, VeilError::InvalidSpan { index: 1, .. }));
}

#[test]
fn test_overlapping_spans_keep_one_winner() {
    let text = "Dr. Ann Lee";
    let spans = vec![
        EntitySpan::with_position("name", "Ann", 4, 7).with_score(0.6),
        EntitySpan::with_position("name medical professional", "Dr. Ann Lee", 0, 11)
            .with_score(0.9),
    ];
    let synthesizer = Synthesizer::new(ReplacementStrategy::Redact);
    let redacted = SpanRedactor::new(&synthesizer).apply(text, &spans).unwrap();

    assert_eq!(redacted.text, "[NAME_MEDICAL_PROFESSIONAL]");
    assert_eq!(redacted.replacement_count(), 1);
    assert_eq!(redacted.skipped.len(), 1);
    assert_eq!(redacted.skipped[0].span_index, 0);
}

#[test]
fn test_concurrent_redaction_shares_synthesizer() {
    let synthesizer = Arc::new(Synthesizer::with_seed(ReplacementStrategy::Synthetic, 1));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let synthesizer = Arc::clone(&synthesizer);
            thread::spawn(move || {
                let text = format!("Unit {i}: SSN 123-45-6789 end");
                let start = text.find("123").unwrap();
                let spans = vec![EntitySpan::with_position("ssn", "123-45-6789", start, start + 11)];
                let output = SpanRedactor::new(&synthesizer).redact(&text, &spans).unwrap();
                assert!(output.starts_with(&format!("Unit {i}: SSN ")));
                assert!(output.ends_with(" end"));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

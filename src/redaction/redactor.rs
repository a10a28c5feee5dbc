//! Span redactor
//!
//! Applies a list of detected spans to one text, replacing each matched
//! range with a synthesized value while keeping every character outside the
//! spans verbatim.
//!
//! # Algorithm
//!
//! 1. No spans: the text is returned unchanged.
//! 2. Positioned spans are validated against the original text (range,
//!    UTF-8 boundaries, matched substring). Any violation rejects the whole
//!    call so a bad splice can never leak part of a value.
//! 3. Overlapping positioned spans are resolved: higher score wins, then the
//!    longer span, then the earlier start. Losers are reported as skipped.
//! 4. Spans without offsets claim the first literal occurrence of their
//!    text in the original string that no other kept span covers, in input
//!    order. Inserted replacement values are never searched.
//! 5. Kept spans are spliced right-to-left: descending start, then
//!    descending end. Every edit only moves text at or after its own start,
//!    so the offsets of the spans still to be processed stay valid against
//!    the original string. A zero-width span sharing its start with a wider
//!    span is inserted after the wider span has been replaced.
//!
//! Replacements copy the case shape of the text they replace: all-caps
//! originals get an all-caps replacement, capitalized originals get a
//! capitalized replacement, anything else is left as generated.

use crate::domain::{Result, VeilError};
use crate::redaction::models::{
    AppliedReplacement, EntitySpan, OffsetUnit, RedactedText, SkipReason, SkippedSpan,
};
use crate::redaction::synthesizer::Synthesizer;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Applies entity spans to text using a [`Synthesizer`] for replacement values
#[derive(Debug, Clone, Copy)]
pub struct SpanRedactor<'a> {
    synthesizer: &'a Synthesizer,
}

impl<'a> SpanRedactor<'a> {
    /// Create a redactor backed by `synthesizer`
    pub fn new(synthesizer: &'a Synthesizer) -> Self {
        Self { synthesizer }
    }

    /// Replace every span in `text` and return the rewritten text
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::InvalidSpan`] naming the first span whose byte
    /// offsets are out of range, reversed, off a character boundary, or do
    /// not select the span's matched text.
    ///
    /// # Examples
    ///
    /// ```
    /// use veil::redaction::models::EntitySpan;
    /// use veil::redaction::redactor::SpanRedactor;
    /// use veil::redaction::synthesizer::{ReplacementStrategy, Synthesizer};
    ///
    /// let synthesizer = Synthesizer::new(ReplacementStrategy::Redact);
    /// let redactor = SpanRedactor::new(&synthesizer);
    /// let spans = vec![EntitySpan::with_position("ssn", "123-45-6789", 4, 15)];
    /// assert_eq!(redactor.redact("SSN 123-45-6789.", &spans).unwrap(), "SSN [SSN].");
    /// ```
    pub fn redact(&self, text: &str, spans: &[EntitySpan]) -> Result<String> {
        Ok(self.apply(text, spans)?.text)
    }

    /// Replace every span in `text`, reporting what was applied and skipped
    ///
    /// # Errors
    ///
    /// See [`SpanRedactor::redact`].
    pub fn apply(&self, text: &str, spans: &[EntitySpan]) -> Result<RedactedText> {
        if spans.is_empty() {
            return Ok(RedactedText::unchanged(text));
        }

        let mut positioned: Vec<(usize, usize, usize)> = Vec::new();
        let mut unpositioned: Vec<usize> = Vec::new();
        for (index, span) in spans.iter().enumerate() {
            match span.offsets() {
                Some((start, end)) => {
                    validate_span(text, index, span, start, end)?;
                    positioned.push((index, start, end));
                }
                None => unpositioned.push(index),
            }
        }

        let (mut kept, mut skipped) = resolve_overlaps(spans, positioned);

        for index in unpositioned {
            let span = &spans[index];
            match find_unclaimed(text, &span.text, &kept) {
                Some(start) => kept.push((index, start, start + span.text.len())),
                None => {
                    tracing::debug!(
                        span_index = index,
                        category = %span.category,
                        "Span text not found; skipping"
                    );
                    skipped.push(SkippedSpan {
                        span_index: index,
                        category: span.category.clone(),
                        reason: SkipReason::NotFound,
                    });
                }
            }
        }

        // Right-to-left: each splice leaves lower offsets untouched.
        kept.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)).then(b.0.cmp(&a.0)));

        let mut output = text.to_string();
        let mut replacements = Vec::with_capacity(kept.len());

        for (index, start, end) in kept {
            let span = &spans[index];
            let replacement = self.replacement_for(span);
            output.replace_range(start..end, &replacement);
            let positioned = span.offsets().is_some();
            replacements.push(AppliedReplacement {
                span_index: index,
                category: span.category.clone(),
                original: span.text.clone(),
                replacement,
                start: positioned.then_some(start),
                end: positioned.then_some(end),
            });
        }

        skipped.sort_by_key(|s| s.span_index);

        Ok(RedactedText {
            text: output,
            replacements,
            skipped,
        })
    }

    fn replacement_for(&self, span: &EntitySpan) -> String {
        let value = self.synthesizer.synthesize(&span.category);
        preserve_case(&value, &span.text)
    }
}

/// Check every positioned span against `text` without applying anything
///
/// # Errors
///
/// See [`SpanRedactor::redact`].
pub fn validate_spans(text: &str, spans: &[EntitySpan]) -> Result<()> {
    for (index, span) in spans.iter().enumerate() {
        if let Some((start, end)) = span.offsets() {
            validate_span(text, index, span, start, end)?;
        }
    }
    Ok(())
}

fn validate_span(
    text: &str,
    index: usize,
    span: &EntitySpan,
    start: usize,
    end: usize,
) -> Result<()> {
    if start > end {
        return Err(VeilError::invalid_span(
            index,
            format!("start {start} is after end {end}"),
        ));
    }
    if end > text.len() {
        return Err(VeilError::invalid_span(
            index,
            format!("end {end} exceeds text length {}", text.len()),
        ));
    }
    if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return Err(VeilError::invalid_span(
            index,
            format!("range {start}..{end} splits a multi-byte character"),
        ));
    }
    if text[start..end] != span.text {
        return Err(VeilError::invalid_span(
            index,
            format!(
                "range {start}..{end} does not select the matched text for category '{}'",
                span.category
            ),
        ));
    }
    Ok(())
}

/// First byte offset of `needle` in `text` whose range touches no claimed span
fn find_unclaimed(text: &str, needle: &str, claimed: &[(usize, usize, usize)]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    let mut from = 0;
    while let Some(found) = text[from..].find(needle) {
        let start = from + found;
        let end = start + needle.len();
        let taken = claimed
            .iter()
            .any(|&(_, claimed_start, claimed_end)| overlaps(start, end, claimed_start, claimed_end));
        if !taken {
            return Some(start);
        }
        from = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Half-open ranges overlap; a zero-width range strictly inside the other counts
fn overlaps(start: usize, end: usize, other_start: usize, other_end: usize) -> bool {
    start < other_end && other_start < end
}

/// Greedy overlap resolution over `(index, start, end)` triples
///
/// Returns the kept triples and the skipped spans.
fn resolve_overlaps(
    spans: &[EntitySpan],
    mut candidates: Vec<(usize, usize, usize)>,
) -> (Vec<(usize, usize, usize)>, Vec<SkippedSpan>) {
    candidates.sort_by(|a, b| {
        let (sa, sb) = (&spans[a.0], &spans[b.0]);
        sb.score
            .partial_cmp(&sa.score)
            .unwrap_or(Ordering::Equal)
            .then((b.2 - b.1).cmp(&(a.2 - a.1)))
            .then(a.1.cmp(&b.1))
            .then(a.0.cmp(&b.0))
    });

    let mut kept: Vec<(usize, usize, usize)> = Vec::with_capacity(candidates.len());
    let mut skipped = Vec::new();

    for candidate in candidates {
        let (index, start, end) = candidate;
        let conflict = kept
            .iter()
            .find(|(_, kept_start, kept_end)| overlaps(start, end, *kept_start, *kept_end));

        match conflict {
            Some((winner, _, _)) => {
                tracing::warn!(
                    span_index = index,
                    kept_index = *winner,
                    category = %spans[index].category,
                    "Overlapping span dropped"
                );
                skipped.push(SkippedSpan {
                    span_index: index,
                    category: spans[index].category.clone(),
                    reason: SkipReason::Overlap { kept: *winner },
                });
            }
            None => kept.push(candidate),
        }
    }

    (kept, skipped)
}

/// Adjust the letter case of `replacement` to the shape of `original`
///
/// - all-caps original: the whole replacement is upper-cased
/// - original starting with a capital: the first character is upper-cased
///   (a single-character replacement is upper-cased entirely)
/// - otherwise, or for an empty original: unchanged
pub fn preserve_case(replacement: &str, original: &str) -> String {
    if original.is_empty() {
        return replacement.to_string();
    }

    if is_all_upper(original) {
        return replacement.to_uppercase();
    }

    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }

    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if replacement.chars().count() > 1 => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(chars.as_str());
            out
        }
        _ => replacement.to_uppercase(),
    }
}

/// True when `text` has at least one cased character and no lower-case ones
fn is_all_upper(text: &str) -> bool {
    let mut cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Convert span offsets reported in `unit` to byte offsets into `text`
///
/// Byte offsets are returned as-is. Character offsets are mapped through the
/// text's character boundaries; an offset past the last character is an
/// invalid span.
pub fn to_byte_offsets<'s>(
    text: &str,
    spans: &'s [EntitySpan],
    unit: OffsetUnit,
) -> Result<Cow<'s, [EntitySpan]>> {
    if unit == OffsetUnit::Byte || spans.iter().all(|s| s.offsets().is_none()) {
        return Ok(Cow::Borrowed(spans));
    }

    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = boundaries.len() - 1;

    let convert = |index: usize, offset: usize| -> Result<usize> {
        boundaries.get(offset).copied().ok_or_else(|| {
            VeilError::invalid_span(
                index,
                format!("character offset {offset} exceeds text length {char_count}"),
            )
        })
    };

    spans
        .iter()
        .enumerate()
        .map(|(index, span)| {
            let mut converted = span.clone();
            if let Some((start, end)) = span.offsets() {
                converted.start = Some(convert(index, start)?);
                converted.end = Some(convert(index, end)?);
            }
            Ok(converted)
        })
        .collect::<Result<Vec<_>>>()
        .map(Cow::Owned)
}

//! Entity detection
//!
//! The engine never runs a model itself. Anything that can turn a text and a
//! set of requested categories into [`EntitySpan`]s implements
//! [`EntityDetector`]; output is treated as untrusted and validated by the
//! redactor before any splice.

pub mod patterns;
pub mod regex;
pub mod span_file;

use crate::domain::Result;
use crate::redaction::models::{EntitySpan, OffsetUnit};
use crate::redaction::selector::ActiveCategories;

pub use self::regex::RegexDetector;
pub use self::span_file::SpanFileDetector;

/// Trait for entity detection implementations
pub trait EntityDetector: Send + Sync {
    /// Detect entities of the requested categories in `text`
    ///
    /// Implementations return only spans whose category is in `categories`
    /// and whose score is at least `threshold`.
    fn detect(
        &self,
        text: &str,
        categories: &ActiveCategories,
        threshold: f32,
    ) -> Result<Vec<EntitySpan>>;

    /// Unit of the offsets in returned spans
    fn offset_unit(&self) -> OffsetUnit {
        OffsetUnit::Byte
    }

    /// Short name for logs and reports
    fn name(&self) -> &'static str;
}

//! Redaction engine for Veil
//!
//! Locates sensitive spans in document text and replaces them with
//! synthetic or placeholder values.
//!
//! # Architecture
//!
//! Leaf-first:
//! - **Taxonomy**: the fixed category registry and its PII / PHI / PCI groups
//! - **Selector**: resolves which categories are active for a run
//! - **Synthesizer**: produces a replacement value for a category
//! - **Redactor**: splices replacements into text, preserving everything else
//! - **Detector**: pluggable source of entity spans
//! - **Engine**: walks a document's text units and builds a [`RunReport`]
//! - **Audit**: records replacements with hashed originals
//!
//! # Usage
//!
//! ```rust
//! use veil::redaction::models::EntitySpan;
//! use veil::redaction::redactor::SpanRedactor;
//! use veil::redaction::synthesizer::{ReplacementStrategy, Synthesizer};
//!
//! let synthesizer = Synthesizer::with_seed(ReplacementStrategy::Synthetic, 7);
//! let spans = vec![
//!     EntitySpan::with_position("name", "Jane Doe", 8, 16),
//!     EntitySpan::with_position("email address", "jane@x.com", 20, 30),
//! ];
//! let text = SpanRedactor::new(&synthesizer)
//!     .redact("Contact Jane Doe at jane@x.com", &spans)
//!     .unwrap();
//! assert!(text.starts_with("Contact "));
//! assert!(text.contains(" at "));
//! ```

pub mod audit;
pub mod config;
pub mod detector;
pub mod engine;
pub mod models;
pub mod redactor;
pub mod report;
pub mod selector;
pub mod synthesizer;
pub mod taxonomy;

// Re-export main types
pub use config::{OutputMode, RunConfig};
pub use engine::RedactionEngine;
pub use models::{EntitySpan, RedactedText};
pub use report::{ReportFormat, RunReport};
pub use selector::{ActiveCategories, CategorySelection};
pub use synthesizer::{ReplacementStrategy, Synthesizer};

// Veil - PII/PHI/PCI Redaction Engine
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

//! # Veil - PII/PHI/PCI Redaction Engine
//!
//! Veil finds personal, health and payment data in document text and either
//! reports it or replaces it with realistic synthetic values.
//!
//! ## Overview
//!
//! This library provides:
//! - **A category taxonomy** of 53 sensitive-data categories and the PII,
//!   PHI and PCI groups built from them
//! - **Category selection** from explicit tokens, a group, or everything
//! - **Replacement synthesis** with a generator per category
//! - **Span redaction** that splices replacements into text while keeping
//!   every byte outside the spans intact
//! - **A run orchestrator** that drives a detector over a document
//!
//! ## Architecture
//!
//! Veil follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`redaction`] - Taxonomy, selection, synthesis, redaction, detection, reports
//! - [`document`] - Document collaborators (text units in, text units out)
//! - [`domain`] - Identifiers and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use veil::redaction::redactor::SpanRedactor;
//! use veil::redaction::synthesizer::{ReplacementStrategy, Synthesizer};
//! use veil::redaction::EntitySpan;
//!
//! # fn example() -> veil::domain::Result<()> {
//! let synthesizer = Synthesizer::new(ReplacementStrategy::Redact);
//! let redactor = SpanRedactor::new(&synthesizer);
//!
//! let text = "Contact Jane Doe at jane@x.com";
//! let spans = vec![
//!     EntitySpan::with_position("name", "Jane Doe", 8, 16),
//!     EntitySpan::with_position("email address", "jane@x.com", 20, 30),
//! ];
//!
//! assert_eq!(
//!     redactor.redact(text, &spans)?,
//!     "Contact [NAME] at [EMAIL_ADDRESS]"
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error type
//! [`domain::VeilError`] names the offending category token or span index:
//!
//! ```rust
//! use veil::domain::VeilError;
//! use veil::redaction::selector::{resolve, CategorySelection};
//!
//! let err = resolve(&CategorySelection::Explicit(vec!["phone_numbr".into()])).unwrap_err();
//! assert!(matches!(err, VeilError::UnknownCategory { ref token } if token == "phone numbr"));
//! ```
//!
//! ## Logging
//!
//! Veil logs through `tracing`. Log events carry categories, counts and
//! offsets, never matched text.

pub mod cli;
pub mod config;
pub mod document;
pub mod domain;
pub mod logging;
pub mod redaction;

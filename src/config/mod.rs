//! Configuration management for Veil.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Veil reads `veil.toml` (or the file named by `--config` / `VEIL_CONFIG`)
//! with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VEIL_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting; a missing default file is not an error
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use veil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("veil.toml")?;
//! println!("Replace threshold: {}", config.detection.replace_threshold);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`DetectionConfig`] - thresholds per mode, pattern library
//! - [`SelectionConfig`] - default categories or group
//! - [`SynthesisConfig`] - replacement strategy and seed
//! - [`AuditConfig`] - audit log of replacements
//! - [`LoggingConfig`] - local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [detection]
//! detect_threshold = 0.5
//! replace_threshold = 0.3
//!
//! [selection]
//! group = "phi"
//!
//! [synthesis]
//! strategy = "synthetic"
//! seed = 42
//!
//! [audit]
//! enabled = true
//! log_path = "${VEIL_AUDIT_DIR}/veil_audit.log"
//! ```

pub mod loader;
pub mod schema;

pub use crate::redaction::config::{AuditConfig, DetectionConfig, SelectionConfig, SynthesisConfig};
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, LoggingConfig, VeilConfig};

//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output on stderr
//! - optional JSON file logging with rotation
//!
//! Log events carry categories, counts, unit addresses and offsets. Matched
//! text is never logged.
//!
//! # Example
//!
//! ```no_run
//! use veil::logging::init_logging;
//! use veil::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of a detect or replace run
///
/// # Example
///
/// ```no_run
/// use veil::log_run_summary;
/// use veil::redaction::{OutputMode, RunConfig, RunReport};
/// use veil::redaction::selector::{resolve, CategorySelection};
///
/// let config = RunConfig::new(resolve(&CategorySelection::All).unwrap(), OutputMode::Report);
/// let report = RunReport::new("notes.txt", &config);
/// log_run_summary!(&report);
/// ```
#[macro_export]
macro_rules! log_run_summary {
    ($report:expr) => {
        tracing::info!(
            run_id = %$report.run_id,
            mode = %$report.mode,
            elements = $report.total_elements,
            instances = $report.summary.total_instances,
            replacements = $report.replacements_made,
            warnings = $report.warnings.len(),
            "Run finished"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use veil::log_error_with_context;
/// use veil::domain::VeilError;
///
/// let error = VeilError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

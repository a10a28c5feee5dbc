//! Audit logging module
//!
//! Records every replacement a run makes, with original values hashed.

pub mod logger;

pub use logger::AuditLogger;

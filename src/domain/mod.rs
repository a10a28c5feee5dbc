//! Domain types for Veil.
//!
//! The domain layer holds the identifiers shared by every other layer and the
//! error hierarchy:
//! - **Identifiers** ([`Category`], [`TextUnitId`])
//! - **Error types** ([`VeilError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, VeilError>`]:
//!
//! ```rust
//! use veil::domain::{Result, VeilError};
//! use veil::redaction::selector::{CategorySelection, resolve};
//!
//! fn example() -> Result<()> {
//!     let active = resolve(&CategorySelection::Explicit(vec!["phone_number".into()]))?;
//!     assert_eq!(active.len(), 1);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::VeilError;
pub use ids::{Category, TextUnitId};
pub use result::Result;

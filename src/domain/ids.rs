//! Domain identifier types
//!
//! Newtype wrappers for the identifiers that flow through a redaction run:
//! sensitive-data categories and the addresses of text units inside a
//! document.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Sensitive-data category identifier
///
/// Categories are free-form lowercase phrases with single spaces between
/// words (`"ssn"`, `"location city"`). The type itself does not check
/// membership in the taxonomy: unregistered categories are legal values and
/// receive a placeholder replacement. Use [`crate::redaction::taxonomy::is_valid`]
/// to check membership.
///
/// # Examples
///
/// ```
/// use veil::domain::ids::Category;
///
/// let category = Category::new("phone number");
/// assert_eq!(category.as_str(), "phone number");
/// assert_eq!(category.placeholder(), "[PHONE_NUMBER]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Creates a new category identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the category as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Deterministic placeholder token, `[<CATEGORY_IN_UPPER_SNAKE_CASE>]`
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.0.to_uppercase().replace(' ', "_"))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Address of a text unit inside a document
///
/// Serializes with an `element_type` tag so reports read
/// `{"element_type": "table_cell", "table": 0, "row": 1, "column": 2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "element_type", rename_all = "snake_case")]
pub enum TextUnitId {
    /// A body paragraph, by position among all paragraphs
    Paragraph {
        /// Paragraph index
        index: usize,
    },
    /// A single table cell
    TableCell {
        /// Table index within the document
        table: usize,
        /// Row index within the table
        row: usize,
        /// Column index within the row
        column: usize,
    },
}

impl TextUnitId {
    /// Short element type name used in reports
    pub fn element_type(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::TableCell { .. } => "table_cell",
        }
    }
}

impl fmt::Display for TextUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph { index } => write!(f, "paragraph {index}"),
            Self::TableCell { table, row, column } => {
                write!(f, "table {table} row {row} column {column}")
            }
        }
    }
}

//! Document collaborators
//!
//! The engine only needs three things from a document: an ordered list of
//! addressable text units, a way to replace one unit's text, and a way to
//! save the result. Container formats implement [`Document`].

pub mod plain_text;

use crate::domain::{Result, TextUnitId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use plain_text::PlainTextDocument;

/// One addressable chunk of document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Where the unit lives in the document
    #[serde(flatten)]
    pub id: TextUnitId,
    /// Raw text of the unit
    pub text: String,
}

/// A document the engine can read units from and write units back to
pub trait Document {
    /// Non-blank text units in document order (paragraphs first, then tables)
    fn units(&self) -> Vec<TextUnit>;

    /// Replace the text of one unit
    ///
    /// The change must be visible to a subsequent [`Document::save`].
    fn set_text(&mut self, id: &TextUnitId, text: String) -> Result<()>;

    /// Write the document to `path`
    fn save(&self, path: &Path) -> Result<()>;
}

/// Default output path for a rewritten document: `<stem>_anonymized.<ext>`
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use veil::document::anonymized_path;
///
/// assert_eq!(
///     anonymized_path(Path::new("/tmp/notes.txt")),
///     Path::new("/tmp/notes_anonymized.txt")
/// );
/// ```
pub fn anonymized_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let file_name = match input.extension() {
        Some(ext) => format!("{stem}_anonymized.{}", ext.to_string_lossy()),
        None => format!("{stem}_anonymized"),
    };

    input.with_file_name(file_name)
}

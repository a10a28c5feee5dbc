//! Plain-text documents
//!
//! Each line is a paragraph, except that runs of consecutive lines containing
//! a tab form a table: each such line is a row and its tab-separated fields
//! are cells. Saving writes the same layout back, so a document with no edits
//! round-trips byte for byte.

use super::{Document, TextUnit};
use crate::domain::{Result, TextUnitId, VeilError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    /// Index into `paragraphs`
    Paragraph(usize),
    /// Index into `tables`
    Table(usize),
}

/// Line-oriented text document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainTextDocument {
    path: Option<PathBuf>,
    paragraphs: Vec<String>,
    tables: Vec<Vec<Vec<String>>>,
    layout: Vec<Block>,
    trailing_newline: bool,
}

impl PlainTextDocument {
    /// Parse document content
    pub fn parse(content: &str) -> Self {
        let trailing_newline = content.ends_with('\n');
        let body = content.strip_suffix('\n').unwrap_or(content);

        let mut paragraphs = Vec::new();
        let mut tables: Vec<Vec<Vec<String>>> = Vec::new();
        let mut layout = Vec::new();

        if !content.is_empty() {
            for line in body.split('\n') {
                if line.contains('\t') {
                    let row: Vec<String> = line.split('\t').map(str::to_string).collect();
                    match layout.last() {
                        Some(Block::Table(t)) => tables[*t].push(row),
                        _ => {
                            layout.push(Block::Table(tables.len()));
                            tables.push(vec![row]);
                        }
                    }
                } else {
                    layout.push(Block::Paragraph(paragraphs.len()));
                    paragraphs.push(line.to_string());
                }
            }
        }

        Self {
            path: None,
            paragraphs,
            tables,
            layout,
            trailing_newline,
        }
    }

    /// Read and parse a document from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            VeilError::Document(format!("Failed to read {}: {e}", path.display()))
        })?;

        let mut document = Self::parse(&content);
        document.path = Some(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            paragraphs = document.paragraphs.len(),
            tables = document.tables.len(),
            "Opened document"
        );
        Ok(document)
    }

    /// Path the document was opened from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of paragraphs, including blank ones
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Serialize back to text
    pub fn render(&self) -> String {
        let lines: Vec<String> = self
            .layout
            .iter()
            .flat_map(|block| match block {
                Block::Paragraph(p) => vec![self.paragraphs[*p].clone()],
                Block::Table(t) => self.tables[*t].iter().map(|row| row.join("\t")).collect(),
            })
            .collect();

        let mut out = lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}

impl Document for PlainTextDocument {
    fn units(&self) -> Vec<TextUnit> {
        let paragraphs = self
            .paragraphs
            .iter()
            .enumerate()
            .map(|(index, text)| (TextUnitId::Paragraph { index }, text));

        let cells = self.tables.iter().enumerate().flat_map(|(table, rows)| {
            rows.iter().enumerate().flat_map(move |(row, cells)| {
                cells.iter().enumerate().map(move |(column, text)| {
                    (TextUnitId::TableCell { table, row, column }, text)
                })
            })
        });

        paragraphs
            .chain(cells)
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(id, text)| TextUnit {
                id,
                text: text.clone(),
            })
            .collect()
    }

    fn set_text(&mut self, id: &TextUnitId, text: String) -> Result<()> {
        let slot = match *id {
            TextUnitId::Paragraph { index } => self.paragraphs.get_mut(index),
            TextUnitId::TableCell { table, row, column } => self
                .tables
                .get_mut(table)
                .and_then(|rows| rows.get_mut(row))
                .and_then(|cells| cells.get_mut(column)),
        };

        let slot = slot.ok_or_else(|| VeilError::Document(format!("No text unit at {id}")))?;
        if text.contains('\n') || (matches!(id, TextUnitId::TableCell { .. }) && text.contains('\t'))
        {
            return Err(VeilError::Document(format!(
                "Replacement text for {id} would change the document layout"
            )));
        }
        *slot = text;
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render()).map_err(|e| {
            VeilError::Document(format!("Failed to write {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "Saved document");
        Ok(())
    }
}

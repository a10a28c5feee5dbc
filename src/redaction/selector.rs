//! Category selection
//!
//! Resolves which categories are active for a run. Exactly one selection mode
//! applies: an explicit token list, a predefined group, or every category.

use crate::domain::{Category, Result, VeilError};
use crate::redaction::taxonomy::{self, Group};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the caller asked for categories
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// User-supplied tokens; underscores stand for spaces (`phone_number`)
    Explicit(Vec<String>),
    /// A predefined group
    Group(Group),
    /// No selection given: every category in the taxonomy
    #[default]
    All,
}

impl CategorySelection {
    /// Build a selection from independently supplied options
    ///
    /// At most one of `categories` and `groups` may be set, and at most one
    /// group may be named.
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::ConflictingSelection`] when more than one mode is
    /// present.
    pub fn from_parts(categories: Option<Vec<String>>, groups: &[Group]) -> Result<Self> {
        let mut modes: Vec<String> = Vec::new();
        if categories.is_some() {
            modes.push("categories".to_string());
        }
        modes.extend(groups.iter().map(|g| g.to_string()));

        if modes.len() > 1 {
            return Err(VeilError::ConflictingSelection(modes));
        }

        Ok(match (categories, groups.first()) {
            (Some(tokens), _) => Self::Explicit(tokens),
            (None, Some(group)) => Self::Group(*group),
            (None, None) => Self::All,
        })
    }

    /// Short description for logs and console output
    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(tokens) => format!("{} explicit categories", tokens.len()),
            Self::Group(group) => format!(
                "{} group ({})",
                group.to_string().to_uppercase(),
                group.description()
            ),
            Self::All => "all categories".to_string(),
        }
    }
}

/// Non-empty, duplicate-free, ordered set of categories active for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveCategories(Vec<Category>);

impl ActiveCategories {
    /// Wrap a list of categories, dropping duplicates and keeping first-seen order
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::EmptySelection`] for an empty list.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let mut unique: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        if unique.is_empty() {
            return Err(VeilError::EmptySelection);
        }
        Ok(Self(unique))
    }

    /// Check whether a category is active
    pub fn contains(&self, category: &str) -> bool {
        self.0.iter().any(|c| c.as_str() == category)
    }

    /// Iterate over the active categories
    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.0.iter()
    }

    /// Number of active categories
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Active categories as a slice
    pub fn as_slice(&self) -> &[Category] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ActiveCategories {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ActiveCategories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Category::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Normalize a user token: underscores become spaces
pub fn normalize_token(token: &str) -> String {
    token.trim().replace('_', " ")
}

/// Resolve a selection into the active category set
///
/// # Errors
///
/// - [`VeilError::UnknownCategory`] for an explicit token that is not in the
///   taxonomy after normalization
/// - [`VeilError::EmptySelection`] for an explicit empty list
///
/// # Examples
///
/// ```
/// use veil::redaction::selector::{resolve, CategorySelection};
///
/// let underscored = resolve(&CategorySelection::Explicit(vec!["phone_number".into()])).unwrap();
/// let spaced = resolve(&CategorySelection::Explicit(vec!["phone number".into()])).unwrap();
/// assert_eq!(underscored, spaced);
/// ```
pub fn resolve(selection: &CategorySelection) -> Result<ActiveCategories> {
    let categories = match selection {
        CategorySelection::Explicit(tokens) => tokens
            .iter()
            .map(|token| {
                let normalized = normalize_token(token);
                if taxonomy::is_valid(&normalized) {
                    Ok(Category::new(normalized))
                } else {
                    Err(VeilError::UnknownCategory { token: normalized })
                }
            })
            .collect::<Result<Vec<_>>>()?,
        CategorySelection::Group(group) => taxonomy::group_members(*group),
        CategorySelection::All => taxonomy::ALL_CATEGORIES
            .iter()
            .copied()
            .map(Category::from)
            .collect(),
    };

    let active = ActiveCategories::new(categories)?;
    tracing::debug!(
        selection = %selection.describe(),
        active = active.len(),
        "Resolved category selection"
    );
    Ok(active)
}

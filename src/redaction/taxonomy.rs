//! Category taxonomy
//!
//! The fixed registry of sensitive-data categories and the three compliance
//! groups built from them.
//!
//! # Groups
//!
//! - **PII**: personally identifiable information (names, contact details,
//!   demographics, locations, identity documents)
//! - **PHI**: protected health information (patients, providers, conditions,
//!   procedures, results, insurance)
//! - **PCI**: payment card industry data (cards, accounts, PINs, amounts)
//!
//! Group membership overlaps: `ssn`, `dob` and the contact fields are in both
//! PII and PHI, `account number` is in both PHI and PCI. `organization`
//! belongs to no group and is only active when selected explicitly or when
//! every category is requested.
//!
//! # Examples
//!
//! ```
//! use veil::redaction::taxonomy::{self, Group};
//!
//! assert!(taxonomy::is_valid("location city"));
//! assert!(!taxonomy::is_valid("location_city"));
//! assert_eq!(Group::Pci.members().len(), 9);
//! ```

use crate::domain::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Every category known to Veil
pub const ALL_CATEGORIES: &[&str] = &[
    "number",
    "location address street",
    "pin",
    "name medical professional",
    "accounts",
    "policy number",
    "marital status",
    "passport number",
    "ssn",
    "discharge date",
    "occupation",
    "date",
    "origin",
    "test result",
    "name",
    "location zip",
    "gender",
    "organization medical facility",
    "esidno",
    "zip",
    "date interval",
    "dob",
    "rate",
    "organization",
    "location state",
    "confirmation number",
    "name given",
    "time",
    "cvv",
    "month",
    "credit card",
    "planduration",
    "filename",
    "age",
    "numerical pii",
    "money",
    "physical attribute",
    "address",
    "credit card expiration",
    "account number",
    "location",
    "language",
    "location city",
    "duration",
    "password",
    "medical process",
    "county",
    "phone number",
    "condition",
    "email address",
    "location address",
    "name family",
    "location country",
];

const PII_MEMBERS: &[&str] = &[
    "name",
    "name given",
    "name family",
    "phone number",
    "email address",
    "ssn",
    "dob",
    "age",
    "gender",
    "marital status",
    "origin",
    "location address",
    "location address street",
    "location city",
    "location state",
    "location country",
    "location zip",
    "location",
    "address",
    "zip",
    "county",
    "passport number",
    "occupation",
    "language",
    "physical attribute",
    "password",
    "filename",
    "date",
    "time",
    "duration",
    "date interval",
    "month",
    "number",
    "numerical pii",
    "esidno",
    "confirmation number",
];

const PHI_MEMBERS: &[&str] = &[
    "name",
    "name medical professional",
    "dob",
    "age",
    "gender",
    "phone number",
    "email address",
    "ssn",
    "location address",
    "organization medical facility",
    "condition",
    "medical process",
    "test result",
    "discharge date",
    "policy number",
    "account number",
    "location city",
    "location state",
    "location zip",
];

const PCI_MEMBERS: &[&str] = &[
    "credit card",
    "credit card expiration",
    "cvv",
    "account number",
    "accounts",
    "pin",
    "money",
    "rate",
    "planduration",
];

/// Predefined compliance group
///
/// # Serialization
///
/// Uses lowercase names for TOML/JSON and the CLI: `"pii"`, `"phi"`, `"pci"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// Personally identifiable information
    Pii,
    /// Protected health information
    Phi,
    /// Payment card industry data
    Pci,
}

impl Group {
    /// All predefined groups
    pub const ALL: [Group; 3] = [Group::Pii, Group::Phi, Group::Pci];

    /// Group members in their canonical order
    pub fn members(&self) -> Vec<Category> {
        self.member_names().iter().copied().map(Category::from).collect()
    }

    /// Group members as static names
    pub fn member_names(&self) -> &'static [&'static str] {
        match self {
            Self::Pii => PII_MEMBERS,
            Self::Phi => PHI_MEMBERS,
            Self::Pci => PCI_MEMBERS,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Pii => "personal identifiers",
            Self::Phi => "health information",
            Self::Pci => "payment card data",
        }
    }

    /// Check whether a category belongs to this group
    pub fn contains(&self, category: &str) -> bool {
        self.member_names().contains(&category)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pii => write!(f, "pii"),
            Self::Phi => write!(f, "phi"),
            Self::Pci => write!(f, "pci"),
        }
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pii" => Ok(Self::Pii),
            "phi" => Ok(Self::Phi),
            "pci" => Ok(Self::Pci),
            _ => Err(format!("Invalid group '{s}'. Must be one of: pii, phi, pci")),
        }
    }
}

/// Every category in the taxonomy
pub fn all_categories() -> BTreeSet<Category> {
    ALL_CATEGORIES.iter().copied().map(Category::from).collect()
}

/// Members of a predefined group, in canonical order
pub fn group_members(group: Group) -> Vec<Category> {
    group.members()
}

/// Check whether `category` is part of the taxonomy
pub fn is_valid(category: &str) -> bool {
    ALL_CATEGORIES.contains(&category)
}

/// Groups that `category` belongs to
pub fn groups_of(category: &str) -> Vec<Group> {
    Group::ALL
        .into_iter()
        .filter(|group| group.contains(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_size() {
        assert_eq!(ALL_CATEGORIES.len(), 53);
        assert_eq!(all_categories().len(), 53, "registry has duplicates");
    }

    #[test]
    fn test_group_sizes() {
        assert_eq!(Group::Pii.members().len(), 36);
        assert_eq!(Group::Phi.members().len(), 19);
        assert_eq!(Group::Pci.members().len(), 9);
    }

    #[test]
    fn test_every_group_member_is_registered() {
        let all = all_categories();
        for group in Group::ALL {
            for member in group.members() {
                assert!(all.contains(&member), "{group} member '{member}' not registered");
            }
        }
    }

    #[test]
    fn test_groups_overlap() {
        assert_eq!(groups_of("ssn"), vec![Group::Pii, Group::Phi]);
        assert_eq!(groups_of("account number"), vec![Group::Phi, Group::Pci]);
    }

    #[test]
    fn test_organization_has_no_group() {
        assert!(is_valid("organization"));
        assert!(groups_of("organization").is_empty());
    }

    #[test]
    fn test_group_from_str() {
        assert_eq!("PHI".parse::<Group>().unwrap(), Group::Phi);
        assert!("hipaa".parse::<Group>().is_err());
        assert_eq!(Group::Pci.to_string(), "pci");
    }

    #[test]
    fn test_is_valid_requires_spaces() {
        assert!(is_valid("email address"));
        assert!(!is_valid("email_address"));
        assert!(!is_valid(""));
    }
}

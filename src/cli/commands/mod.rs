//! CLI command implementations
//!
//! This module contains all CLI command implementations and the argument
//! groups they share.

pub mod categories;
pub mod detect;
pub mod init;
pub mod replace;
pub mod validate;

use crate::config::{SelectionConfig, VeilConfig};
use crate::domain::{Result, VeilError};
use crate::redaction::selector::{resolve, CategorySelection};
use crate::redaction::taxonomy::Group;
use crate::redaction::{OutputMode, RunConfig};
use clap::Args;

/// Exit code for configuration and selection errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code for any other failure
pub const EXIT_FATAL: i32 = 5;

/// Category selection flags shared by `detect` and `replace`
///
/// At most one of these may be given. With none, the `[selection]` section
/// of the configuration applies, and without that every category is active.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Explicit categories (underscores stand for spaces, e.g. phone_number)
    #[arg(long, num_args = 1.., value_name = "CATEGORY")]
    pub categories: Option<Vec<String>>,

    /// Select the PII group
    #[arg(long)]
    pub pii: bool,

    /// Select the PHI group
    #[arg(long)]
    pub phi: bool,

    /// Select the PCI group
    #[arg(long)]
    pub pci: bool,
}

impl SelectionArgs {
    fn groups(&self) -> Vec<Group> {
        [(self.pii, Group::Pii), (self.phi, Group::Phi), (self.pci, Group::Pci)]
            .into_iter()
            .filter_map(|(set, group)| set.then_some(group))
            .collect()
    }

    /// True when no selection flag was given
    pub fn is_empty(&self) -> bool {
        self.categories.is_none() && !self.pii && !self.phi && !self.pci
    }

    /// Build the selection, falling back to the configured default
    ///
    /// # Errors
    ///
    /// [`VeilError::ConflictingSelection`] when more than one flag is given.
    pub fn to_selection(&self, fallback: &SelectionConfig) -> Result<CategorySelection> {
        if self.is_empty() {
            return fallback.to_selection();
        }
        CategorySelection::from_parts(self.categories.clone(), &self.groups())
    }
}

/// Resolve the per-run settings from CLI flags and configuration
pub(crate) fn run_config(
    selection: &SelectionArgs,
    threshold: Option<f32>,
    mode: OutputMode,
    config: &VeilConfig,
) -> Result<RunConfig> {
    let categories = resolve(&selection.to_selection(&config.selection)?)?;
    let threshold = threshold.unwrap_or_else(|| config.detection.threshold_for(mode));
    RunConfig::new(categories, mode).with_threshold(threshold)
}

/// Print a library error the way every command does and map it to an exit code
pub(crate) fn report_error(action: &str, error: &VeilError) -> i32 {
    tracing::error!(error = %error, action, "Command failed");
    println!("❌ {action}");
    println!("   Error: {error}");
    if error.is_configuration() {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_FATAL
    }
}

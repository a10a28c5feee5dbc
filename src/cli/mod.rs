//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Veil using clap.

pub mod commands;

use crate::config::loader::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Veil - PII/PHI/PCI detection and replacement
#[derive(Parser, Debug)]
#[command(name = "veil")]
#[command(version, about, long_about = None)]
#[command(author = "Veil Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "VEIL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VEIL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration path to load, or `None` for the implicit default file
    ///
    /// Only an explicitly named file has to exist.
    pub fn config_path(&self) -> Option<&Path> {
        if self.config == DEFAULT_CONFIG_FILE {
            None
        } else {
            Some(Path::new(&self.config))
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a document and report sensitive data without modifying it
    Detect(commands::detect::DetectArgs),

    /// Replace sensitive data in a document with synthetic values
    Replace(commands::replace::ReplaceArgs),

    /// List categories and groups
    Categories(commands::categories::CategoriesArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "veil.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Veil configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: veil validate-config");
                println!("  3. Scan a document: veil detect notes.txt");
                println!("  4. Replace sensitive data: veil replace notes.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# Veil Configuration File

[application]
log_level = "info"

[detection]
detect_threshold = 0.5
replace_threshold = 0.3

[synthesis]
strategy = "synthetic"

[audit]
enabled = false
log_path = "./audit/veil_audit.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# Veil Configuration File
#
# Every section is optional; missing values take the defaults shown here.
# Values may reference environment variables as ${VAR_NAME}, and any key can
# be overridden with VEIL_<SECTION>_<KEY> (e.g. VEIL_SYNTHESIS_SEED=42).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Detection
# ============================================================================
[detection]
# Minimum confidence for `veil detect`
detect_threshold = 0.5

# Minimum confidence for `veil replace` (lower, so fewer entities are missed)
replace_threshold = 0.3

# Optional TOML pattern library replacing the built-in patterns
# pattern_library = "./patterns/custom.toml"

# ============================================================================
# Default Category Selection
# ============================================================================
# Used when no --categories/--pii/--phi/--pci flag is given.
# Set at most one of `categories` and `group`; with neither, every category
# is active. Run `veil categories` for the full list.
[selection]
# categories = ["name", "phone_number", "email_address"]
# group = "phi"  # pii | phi | pci

# ============================================================================
# Replacement Values
# ============================================================================
[synthesis]
# synthetic: realistic generated values
# static:    fixed sample value per category
# redact:    [CATEGORY] placeholders
strategy = "synthetic"

# Fix the random seed for reproducible output
# seed = 42

# ============================================================================
# Audit Log
# ============================================================================
# Records every replace run. Original values are stored as SHA-256 hashes.
[audit]
enabled = false
log_path = "./audit/veil_audit.log"
json_format = true

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"

# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}

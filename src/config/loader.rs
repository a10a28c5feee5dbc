//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VeilConfig;
use crate::domain::{Result, VeilError};
use crate::redaction::synthesizer::ReplacementStrategy;
use crate::redaction::taxonomy::Group;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "veil.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`VeilConfig`]
/// 4. Applies environment variable overrides (`VEIL_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced environment variable is unset, an override is malformed, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use veil::config::loader::load_config;
///
/// let config = load_config("veil.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VeilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VeilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VeilError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// Used for the implicit default path: a missing `veil.toml` is not an
/// error, but an explicitly named file must exist.
pub fn load_config_or_default(path: Option<&Path>) -> Result<VeilConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load_config(&default_path)
            } else {
                tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                let mut config = VeilConfig::default();
                apply_env_overrides(&mut config)?;
                validate(&config)?;
                Ok(config)
            }
        }
    }
}

/// Parse configuration from TOML content, with substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<VeilConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: VeilConfig = toml::from_str(&contents)
        .map_err(|e| VeilError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &VeilConfig) -> Result<()> {
    config.validate().map_err(|e| {
        VeilError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied verbatim.
///
/// # Errors
///
/// Returns an error naming every referenced environment variable that is
/// not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| VeilError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VeilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `VEIL_*` prefix
///
/// Environment variables follow the pattern `VEIL_<SECTION>_<KEY>`, for
/// example `VEIL_DETECTION_REPLACE_THRESHOLD` or `VEIL_SYNTHESIS_STRATEGY`.
/// A value that does not parse is an error naming the variable.
fn apply_env_overrides(config: &mut VeilConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_var("VEIL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Detection overrides
    if let Some(val) = env_parse("VEIL_DETECTION_DETECT_THRESHOLD")? {
        config.detection.detect_threshold = val;
    }
    if let Some(val) = env_parse("VEIL_DETECTION_REPLACE_THRESHOLD")? {
        config.detection.replace_threshold = val;
    }
    if let Some(val) = env_var("VEIL_DETECTION_PATTERN_LIBRARY") {
        config.detection.pattern_library = Some(PathBuf::from(val));
    }

    // Selection overrides
    if let Some(val) = env_var("VEIL_SELECTION_CATEGORIES") {
        config.selection.categories = Some(
            val.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }
    if let Some(val) = env_parse::<Group>("VEIL_SELECTION_GROUP")? {
        config.selection.group = Some(val);
    }

    // Synthesis overrides
    if let Some(val) = env_parse::<ReplacementStrategy>("VEIL_SYNTHESIS_STRATEGY")? {
        config.synthesis.strategy = val;
    }
    if let Some(val) = env_parse("VEIL_SYNTHESIS_SEED")? {
        config.synthesis.seed = Some(val);
    }

    // Audit overrides
    if let Some(val) = env_parse("VEIL_AUDIT_ENABLED")? {
        config.audit.enabled = val;
    }
    if let Some(val) = env_var("VEIL_AUDIT_LOG_PATH") {
        config.audit.log_path = PathBuf::from(val);
    }
    if let Some(val) = env_parse("VEIL_AUDIT_JSON_FORMAT")? {
        config.audit.json_format = val;
    }

    // Logging overrides
    if let Some(val) = env_parse("VEIL_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_var("VEIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_var("VEIL_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(name)
        .map(|val| {
            val.trim().parse::<T>().map_err(|e| {
                VeilError::Configuration(format!("Invalid {name} value '{val}': {e}"))
            })
        })
        .transpose()
}

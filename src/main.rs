// Veil - PII/PHI/PCI Redaction Engine
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use veil::cli::commands::{EXIT_CONFIG_ERROR, EXIT_FATAL};
use veil::cli::{Cli, Commands};
use veil::config::{load_config_or_default, LoggingConfig, VeilConfig};
use veil::domain::VeilError;
use veil::log_error_with_context;
use veil::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // A broken config still gets console logging so the error can be reported
    let config = load_config_or_default(cli.config_path());
    let logging_config = match config {
        Ok(ref c) => c.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Veil - PII/PHI/PCI Redaction Engine"
    );

    let exit_code = match execute_command(&cli, config).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    config: veil::domain::Result<VeilConfig>,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Detect(args) => match config {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(config_failure(&e)),
        },
        Commands::Replace(args) => match config {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(config_failure(&e)),
        },
        Commands::Categories(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}

fn config_failure(error: &VeilError) -> i32 {
    log_error_with_context!(error, "Failed to load configuration");
    eprintln!("❌ Failed to load configuration");
    eprintln!("   Error: {error}");
    EXIT_CONFIG_ERROR
}

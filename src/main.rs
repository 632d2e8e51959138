// yaml2mongo - Upsert YAML documents into MongoDB
// Copyright (c) 2025 yaml2mongo Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use yaml2mongo::cli::{Cli, EXIT_FATAL};
use yaml2mongo::config::load_config;
use yaml2mongo::core::timer::TimerRegistry;
use yaml2mongo::logging::{setup_logging, DEFAULT_LOGGING_PATH, LOGGING_ENV_KEY};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // Variables already set in the process environment win
    let _ = dotenvy::dotenv();

    let exit_code = run().await;
    process::exit(exit_code);
}

/// Runs the setup steps in order and returns the exit code
///
/// The logging guard lives until this returns so buffered file logs flush
/// before the process exits.
async fn run() -> i32 {
    let _guard = match setup_logging(DEFAULT_LOGGING_PATH, "info", LOGGING_ENV_KEY, true) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return EXIT_FATAL;
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "yaml2mongo - Upsert YAML documents into MongoDB"
    );

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return EXIT_FATAL;
        }
    };
    match &config.source {
        Some(path) => tracing::debug!(path = %path.display(), "Configuration loaded"),
        None => tracing::debug!("No configuration file found, using defaults"),
    }

    // Usage errors print the clap message and exit with code 2
    let cli = Cli::parse();

    let registry = TimerRegistry::new();
    match cli.execute(&config, &registry).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            EXIT_FATAL
        }
    }
}

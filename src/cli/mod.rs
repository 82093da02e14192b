//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Docbridge using clap.
//!
//! Exit codes: 0 success, 2 configuration error, 4 connection error,
//! 5 fatal error.

pub mod commands;

use crate::config::{load_config, DocBridgeConfig, LoggingConfig};
use clap::{Parser, Subcommand};

/// Docbridge - Typed document access for Azure Cosmos DB
#[derive(Parser, Debug)]
#[command(name = "docbridge")]
#[command(version, about, long_about = None)]
#[command(author = "Docbridge Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "docbridge.toml", env = "DOCBRIDGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DOCBRIDGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Connect to Cosmos DB and check every mapped container
    Check(commands::check::CheckArgs),
}

impl Cli {
    /// Log level and logging settings for this invocation
    ///
    /// Reads the configuration file for every command except `init`. A file
    /// that fails to load falls back to console logging; the command reports
    /// the load error itself.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let config = match self.command {
            Commands::Init(_) => None,
            _ => load_config(&self.config).ok(),
        };
        logging_settings(self.log_level.as_deref(), config.as_ref())
    }
}

/// Resolves the log level and logging settings
///
/// `--log-level` wins over `[application].log_level`, which wins over
/// `info`. File logging follows `[logging]` when a configuration is given.
pub fn logging_settings(
    cli_level: Option<&str>,
    config: Option<&DocBridgeConfig>,
) -> (String, LoggingConfig) {
    let level = cli_level
        .map(str::to_string)
        .or_else(|| config.map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    let logging = match config {
        Some(config) => config.logging.clone(),
        None => LoggingConfig {
            local_enabled: false,
            ..LoggingConfig::default()
        },
    };

    (level, logging)
}

//! Configuration schema types
//!
//! This module defines the configuration structure for Docbridge.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Docbridge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocBridgeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Azure Cosmos DB configuration
    pub cosmosdb: CosmosDbConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DocBridgeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.cosmosdb.validate(&self.environment)?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Azure Cosmos DB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosDbConfig {
    /// Cosmos DB endpoint URL
    pub endpoint: String,

    /// Cosmos DB access key
    /// Stored securely in memory and automatically zeroized on drop
    pub key: SecretString,

    /// Default database name for container mappings that don't name one
    pub database_name: String,

    /// Create missing databases and containers when the service is built
    #[serde(default)]
    pub create_if_missing: bool,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Document kind to container mappings
    #[serde(default)]
    pub containers: Vec<ContainerMapping>,
}

impl CosmosDbConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.endpoint.is_empty() {
            return Err("cosmosdb.endpoint cannot be empty".to_string());
        }

        let endpoint = url::Url::parse(&self.endpoint)
            .map_err(|e| format!("cosmosdb.endpoint is not a valid URL: {e}"))?;

        match endpoint.scheme() {
            "https" => {}
            "http" if is_local_host(&endpoint) => {
                if *environment == Environment::Production {
                    return Err(
                        "cosmosdb.endpoint must use https:// in production environments"
                            .to_string(),
                    );
                }
            }
            _ => {
                return Err(
                    "cosmosdb.endpoint must start with https:// (http:// is only allowed for a local emulator)"
                        .to_string(),
                )
            }
        }

        if self.key.expose_secret().is_empty() {
            return Err("cosmosdb.key cannot be empty".to_string());
        }

        if self.database_name.trim().is_empty() {
            return Err("cosmosdb.database_name cannot be empty".to_string());
        }

        if self.request_timeout_seconds == 0 || self.request_timeout_seconds > 300 {
            return Err(format!(
                "cosmosdb.request_timeout_seconds must be between 1 and 300, got {}",
                self.request_timeout_seconds
            ));
        }

        let mut kinds = HashSet::new();
        for mapping in &self.containers {
            mapping.validate()?;
            if !kinds.insert(mapping.kind.as_str()) {
                return Err(format!(
                    "cosmosdb.containers: duplicate mapping for kind '{}'",
                    mapping.kind
                ));
            }
        }

        Ok(())
    }
}

fn is_local_host(url: &url::Url) -> bool {
    matches!(url.host_str(), Some("localhost") | Some("127.0.0.1"))
}

/// Maps a document kind to the container that stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerMapping {
    /// Document kind (`Document::KIND`)
    pub kind: String,

    /// Container name
    pub container: String,

    /// Database name; defaults to `cosmosdb.database_name`
    #[serde(default)]
    pub database: Option<String>,

    /// Partition key path used when the container is created
    #[serde(default = "default_partition_key_path")]
    pub partition_key_path: String,
}

impl ContainerMapping {
    fn validate(&self) -> Result<(), String> {
        if self.kind.trim().is_empty() {
            return Err("cosmosdb.containers: kind cannot be empty".to_string());
        }

        if self.container.trim().is_empty() {
            return Err(format!(
                "cosmosdb.containers: container for kind '{}' cannot be empty",
                self.kind
            ));
        }

        if let Some(database) = &self.database {
            if database.trim().is_empty() {
                return Err(format!(
                    "cosmosdb.containers: database for kind '{}' cannot be empty when set",
                    self.kind
                ));
            }
        }

        if !self.partition_key_path.starts_with('/') || self.partition_key_path.len() < 2 {
            return Err(format!(
                "cosmosdb.containers: partition_key_path for kind '{}' must look like '/field', got '{}'",
                self.kind, self.partition_key_path
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

pub(crate) fn default_partition_key_path() -> String {
    "/partitionKey".to_string()
}

fn default_local_path() -> String {
    "/var/log/docbridge".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

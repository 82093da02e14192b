//! Configuration management for Docbridge.
//!
//! Docbridge uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DOCBRIDGE_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docbridge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("docbridge.toml")?;
//! println!("Cosmos DB: {}", config.cosmosdb.database_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [cosmosdb]
//! endpoint = "https://your-account.documents.azure.com:443/"
//! key = "${DOCBRIDGE_COSMOSDB_KEY}"
//! database_name = "app"
//! create_if_missing = false
//!
//! [[cosmosdb.containers]]
//! kind = "customer"
//! container = "customers"
//! partition_key_path = "/tenant"
//!
//! [[cosmosdb.containers]]
//! kind = "audit_entry"
//! database = "audit"
//! container = "entries"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, ContainerMapping, CosmosDbConfig, DocBridgeConfig, Environment,
    LoggingConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};

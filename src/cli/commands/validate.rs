//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Docbridge configuration file.

use crate::config::load_config;
use crate::config::schema::DocBridgeConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print!("{}", summary(&config));
        println!();
        Ok(0)
    }
}

/// Human-readable configuration summary; the account key is never shown
fn summary(config: &DocBridgeConfig) -> String {
    let mut out = String::from("Configuration Summary:\n");
    out.push_str(&format!("  Environment: {:?}\n", config.environment));
    out.push_str(&format!("  Log Level: {}\n", config.application.log_level));
    out.push_str(&format!("  Cosmos DB Endpoint: {}\n", config.cosmosdb.endpoint));
    out.push_str(&format!("  Cosmos DB Database: {}\n", config.cosmosdb.database_name));
    out.push_str(&format!(
        "  Create If Missing: {}\n",
        config.cosmosdb.create_if_missing
    ));
    out.push_str(&format!(
        "  Request Timeout: {}s\n",
        config.cosmosdb.request_timeout_seconds
    ));

    if config.cosmosdb.containers.is_empty() {
        out.push_str("  Containers: (none mapped)\n");
    } else {
        out.push_str("  Containers:\n");
        for mapping in &config.cosmosdb.containers {
            let database = mapping
                .database
                .as_deref()
                .unwrap_or(&config.cosmosdb.database_name);
            out.push_str(&format!(
                "    {} -> {}/{} (partition key {})\n",
                mapping.kind, database, mapping.container, mapping.partition_key_path
            ));
        }
    }

    if config.logging.local_enabled {
        out.push_str(&format!(
            "  File Logging: {} ({})\n",
            config.logging.local_path, config.logging.local_rotation
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_summary_lists_mappings_without_key() {
        let config = load_config_from_str(
            r#"
[cosmosdb]
endpoint = "https://test.documents.azure.com:443/"
key = "super-secret-key"
database_name = "app"

[[cosmosdb.containers]]
kind = "customer"
container = "customers"

[[cosmosdb.containers]]
kind = "audit_entry"
container = "entries"
database = "audit"
"#,
        )
        .unwrap();

        let text = summary(&config);
        assert!(text.contains("customer -> app/customers (partition key /partitionKey)"));
        assert!(text.contains("audit_entry -> audit/entries"));
        assert!(!text.contains("super-secret-key"));
    }

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let code = ValidateArgs {}
            .execute(&path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}

//! Check command implementation
//!
//! This module implements the `check` command, which verifies connectivity
//! and optionally creates missing databases and containers.

use crate::adapters::cosmosdb::client::CosmosDbClient;
use crate::adapters::store::create_container_factory;
use crate::config::load_config;
use clap::Args;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Create missing databases and containers
    #[arg(long)]
    pub ensure: bool,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, ensure = self.ensure, "Checking Cosmos DB");

        println!("🔌 Checking Cosmos DB connectivity");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let factory = create_container_factory(&config);

        let client = match CosmosDbClient::new(config.cosmosdb.clone()) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to create Cosmos DB client");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        if self.ensure || config.cosmosdb.create_if_missing {
            if let Err(e) = client.ensure_all(&factory).await {
                println!("❌ Failed to ensure databases and containers");
                println!("   Error: {e}");
                return Ok(4);
            }
            println!("✅ Databases and containers ensured");
        }

        if let Err(e) = client.test_connection().await {
            println!("❌ Failed to connect to {}", client.endpoint());
            println!("   Error: {e}");
            return Ok(4);
        }
        println!("✅ Connected to {}", client.endpoint());

        let mut missing = 0;
        for (kind, location) in factory.locations() {
            let container = client.container_client(location);
            match container.read(None).await {
                Ok(_) => println!("  ✅ {kind} -> {location}"),
                Err(e) => {
                    missing += 1;
                    tracing::warn!(kind = %kind, container = %location, error = %e, "Container check failed");
                    println!("  ❌ {kind} -> {location}: {e}");
                }
            }
        }
        println!();

        if missing > 0 {
            println!("{missing} container(s) unavailable. Run with --ensure to create them.");
            return Ok(4);
        }

        println!("All {} container mapping(s) available", factory.len());
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_config_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docbridge.toml");
        std::fs::write(&path, "[cosmosdb]\nendpoint = \"not a url\"\n").unwrap();

        let code = CheckArgs { ensure: false }
            .execute(&path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}

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
    #[arg(short, long, default_value = "docbridge.toml")]
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

        println!("📝 Initializing Docbridge configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
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
                println!("  1. Edit {} with your account endpoint and containers", self.output);
                println!("  2. Set DOCBRIDGE_COSMOSDB_KEY in your environment or .env file");
                println!("  3. Validate configuration: docbridge validate-config");
                println!("  4. Check connectivity: docbridge check --ensure");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Docbridge Configuration File

environment = "development"

[application]
log_level = "info"

[cosmosdb]
endpoint = "https://your-account.documents.azure.com:443/"
key = "${DOCBRIDGE_COSMOSDB_KEY}"
database_name = "app"
create_if_missing = false
request_timeout_seconds = 30

[[cosmosdb.containers]]
kind = "customer"
container = "customers"
partition_key_path = "/partitionKey"

[logging]
local_enabled = false
local_path = "/var/log/docbridge"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and detailed comments
    fn generate_config_with_examples() -> String {
        r#"# Docbridge Configuration File
# Typed document access for Azure Cosmos DB
#
# Values of the form ${VAR} are read from the environment (or a .env file).
# Any setting can also be overridden with DOCBRIDGE_<SECTION>_<KEY>, for
# example DOCBRIDGE_COSMOSDB_ENDPOINT.

# Runtime environment: development | staging | production
# Plain http endpoints (local emulator) are rejected in production.
environment = "development"

[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

[cosmosdb]
# Account endpoint. Use https://localhost:8081/ for the local emulator.
endpoint = "https://your-account.documents.azure.com:443/"

# Account key; keep it out of the file
key = "${DOCBRIDGE_COSMOSDB_KEY}"

# Database used by container mappings that don't name one
database_name = "app"

# Create missing databases and containers when the service starts
create_if_missing = false

# Per-request timeout (1-300 seconds)
request_timeout_seconds = 30

# One entry per document kind. `kind` must match Document::KIND.
[[cosmosdb.containers]]
kind = "customer"
container = "customers"
partition_key_path = "/tenantId"

[[cosmosdb.containers]]
kind = "order"
container = "orders"
partition_key_path = "/customerId"

# A mapping can target a different database
[[cosmosdb.containers]]
kind = "audit_entry"
container = "entries"
database = "audit"

[logging]
# JSON log file in addition to console output
local_enabled = false
local_path = "/var/log/docbridge"

# Rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

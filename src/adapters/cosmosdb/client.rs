//! Cosmos DB client implementation
//!
//! This module owns the SDK client and the setup operations: connection
//! checks and creation of missing databases and containers.

use crate::adapters::cosmosdb::factory::{ContainerFactory, ContainerLocation};
use crate::config::CosmosDbConfig;
use crate::domain::{CosmosDbError, DocBridgeError, Result};
use azure_core::credentials::Secret;
use azure_data_cosmos::clients::ContainerClient;
use azure_data_cosmos::models::{ContainerProperties, IndexingPolicy, PartitionKeyDefinition};
use azure_data_cosmos::{CosmosClient, CosmosClientOptions};
use std::borrow::Cow;
use std::time::Duration;

/// Cosmos DB client for Docbridge
///
/// Provides methods for connecting to Azure Cosmos DB, ensuring databases
/// and containers exist, and handing out container clients.
pub struct CosmosDbClient {
    /// Cosmos DB client
    client: CosmosClient,

    /// Configuration
    config: CosmosDbConfig,
}

impl CosmosDbClient {
    /// Create a new Cosmos DB client
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(config: CosmosDbConfig) -> Result<Self> {
        use secrecy::ExposeSecret;

        let key_str: String = config.key.expose_secret().clone().into();
        let key = Secret::new(key_str);
        let options = Some(CosmosClientOptions::default());

        let client = CosmosClient::with_key(&config.endpoint, key, options).map_err(|e| {
            DocBridgeError::CosmosDb(CosmosDbError::ConnectionFailed(format!(
                "Failed to create Cosmos client: {e}"
            )))
        })?;

        tracing::info!(
            endpoint = %config.endpoint,
            database = %config.database_name,
            "Cosmos DB client created"
        );

        Ok(Self { client, config })
    }

    /// Test the connection to Cosmos DB
    ///
    /// Reads the default database to verify connectivity and credentials.
    pub async fn test_connection(&self) -> Result<()> {
        let database = self.client.database_client(&self.config.database_name);
        database.read(None).await.map_err(|e| {
            DocBridgeError::CosmosDb(CosmosDbError::ConnectionFailed(format!(
                "Connection test failed: {e}"
            )))
        })?;

        Ok(())
    }

    /// Ensure a database exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub async fn ensure_database_exists(&self, database_name: &str) -> Result<()> {
        let database = self.client.database_client(database_name);

        match database.read(None).await {
            Ok(_) => {
                tracing::info!(database = %database_name, "Database already exists");
                Ok(())
            }
            Err(_) => {
                tracing::info!(database = %database_name, "Creating database");

                self.client
                    .create_database(database_name, None)
                    .await
                    .map_err(|e| {
                        DocBridgeError::CosmosDb(CosmosDbError::DatabaseCreationFailed(format!(
                            "Failed to create database {database_name}: {e}"
                        )))
                    })?;

                tracing::info!(database = %database_name, "Database created successfully");
                Ok(())
            }
        }
    }

    /// Ensure a container exists, creating it if necessary
    ///
    /// The partition key path comes from the location.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be created.
    pub async fn ensure_container_exists(&self, location: &ContainerLocation) -> Result<()> {
        let database = self.client.database_client(&location.database);
        let container = database.container_client(&location.container);

        match container.read(None).await {
            Ok(_) => {
                tracing::info!(container = %location, "Container already exists");
                Ok(())
            }
            Err(_) => {
                tracing::info!(
                    container = %location,
                    partition_key_path = %location.partition_key_path,
                    "Creating container"
                );

                let partition_key_def = PartitionKeyDefinition {
                    paths: vec![location.partition_key_path.clone()],
                    kind: azure_data_cosmos::models::PartitionKeyKind::Hash,
                    version: None,
                };

                let properties = ContainerProperties {
                    id: Cow::Owned(location.container.clone()),
                    partition_key: partition_key_def,
                    indexing_policy: Some(IndexingPolicy::default()),
                    ..Default::default()
                };

                database
                    .create_container(properties, None)
                    .await
                    .map_err(|e| {
                        DocBridgeError::CosmosDb(CosmosDbError::ContainerCreationFailed(format!(
                            "Failed to create container {location}: {e}"
                        )))
                    })?;

                tracing::info!(container = %location, "Container created successfully");
                Ok(())
            }
        }
    }

    /// Ensure every database and container the factory maps
    pub async fn ensure_all(&self, factory: &ContainerFactory) -> Result<()> {
        for database in factory.databases() {
            self.ensure_database_exists(&database).await?;
        }

        for (kind, location) in factory.locations() {
            tracing::debug!(kind = %kind, container = %location, "Ensuring container");
            self.ensure_container_exists(location).await?;
        }

        Ok(())
    }

    /// Get a container client for a location
    pub fn container_client(&self, location: &ContainerLocation) -> ContainerClient {
        self.client
            .database_client(&location.database)
            .container_client(&location.container)
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_seconds)
    }

    /// Get the default database name
    pub fn database_name(&self) -> &str {
        &self.config.database_name
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config() -> CosmosDbConfig {
        CosmosDbConfig {
            endpoint: "https://test.documents.azure.com:443/".to_string(),
            key: secret_string("dGVzdC1rZXk=".to_string()),
            database_name: "test_db".to_string(),
            create_if_missing: false,
            request_timeout_seconds: 45,
            containers: Vec::new(),
        }
    }

    #[test]
    fn test_client_accessors() {
        let client = CosmosDbClient::new(config()).unwrap();

        assert_eq!(client.database_name(), "test_db");
        assert_eq!(client.endpoint(), "https://test.documents.azure.com:443/");
        assert_eq!(client.request_timeout(), Duration::from_secs(45));
    }

    #[test]
    fn test_container_client_is_built_without_network() {
        let client = CosmosDbClient::new(config()).unwrap();
        let location = ContainerLocation::new("test_db", "customers");
        let _container = client.container_client(&location);
    }
}

//! Document service factory
//!
//! This module wires configuration, client and container mappings into a
//! ready-to-use document service.

use crate::adapters::cosmosdb::client::CosmosDbClient;
use crate::adapters::cosmosdb::factory::ContainerFactory;
use crate::adapters::cosmosdb::service::CosmosDocumentService;
use crate::config::schema::DocBridgeConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Build the container factory from `[[cosmosdb.containers]]`
pub fn create_container_factory(config: &DocBridgeConfig) -> ContainerFactory {
    ContainerFactory::from_config(&config.cosmosdb)
}

/// Create a Cosmos DB backed document service
///
/// When `cosmosdb.create_if_missing` is set, every mapped database and
/// container is created before the service is returned.
///
/// # Errors
///
/// Returns an error if the client cannot be created or a database or
/// container cannot be ensured.
pub async fn create_document_service(config: &DocBridgeConfig) -> Result<Arc<CosmosDocumentService>> {
    let factory = create_container_factory(config);

    tracing::info!(mappings = factory.len(), "Creating CosmosDB document service");
    let client = CosmosDbClient::new(config.cosmosdb.clone())?;

    if config.cosmosdb.create_if_missing {
        client.ensure_all(&factory).await?;
    }

    Ok(Arc::new(CosmosDocumentService::new(client, factory)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    const CONFIG: &str = r#"
environment = "development"

[cosmosdb]
endpoint = "https://test.documents.azure.com:443/"
key = "dGVzdC1rZXk="
database_name = "app"

[[cosmosdb.containers]]
kind = "customer"
container = "customers"
partition_key_path = "/tenant"
"#;

    #[test]
    fn test_create_container_factory() {
        let config = load_config_from_str(CONFIG).unwrap();
        let factory = create_container_factory(&config);

        let location = factory.resolve_kind("customer").unwrap();
        assert_eq!(location.to_string(), "app/customers");
        assert_eq!(location.partition_key_path, "/tenant");
    }

    #[tokio::test]
    async fn test_create_document_service_without_ensure() {
        let config = load_config_from_str(CONFIG).unwrap();
        let service = create_document_service(&config).await.unwrap();

        assert_eq!(service.factory().len(), 1);
        assert_eq!(service.client().database_name(), "app");
    }
}

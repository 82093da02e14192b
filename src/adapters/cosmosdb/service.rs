//! Cosmos DB implementation of [`DocumentService`]
//!
//! Each operation resolves the container for `T::KIND`, forwards the call to
//! the SDK under the configured request timeout and classifies the outcome.

use crate::adapters::cosmosdb::client::CosmosDbClient;
use crate::adapters::cosmosdb::factory::{ContainerFactory, ContainerLocation};
use crate::adapters::cosmosdb::status::{classify_error, data_failure, store_failure};
use crate::adapters::store::query::{DocumentQuery, RenderedQuery};
use crate::adapters::store::traits::DocumentService;
use crate::domain::{
    check_partition_key, to_document_body, DataResult, Document, DocumentKey, PartitionKeyValue, ResultStatus,
    StoreResult,
};
use crate::log_operation;
use async_trait::async_trait;
use azure_data_cosmos::{PartitionKey, Query};
use futures::stream::StreamExt;
use std::future::Future;
use std::sync::Arc;

/// A classified failure, before it is logged and wrapped
struct Failure {
    status: ResultStatus,
    message: String,
}

impl Failure {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::InternalError,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum WriteMode {
    Create,
    Replace,
    Upsert,
}

impl WriteMode {
    fn as_str(self) -> &'static str {
        match self {
            WriteMode::Create => "add",
            WriteMode::Replace => "update",
            WriteMode::Upsert => "upsert",
        }
    }
}

fn sdk_partition_key(value: &PartitionKeyValue) -> PartitionKey {
    PartitionKey::from(value.as_str().to_string())
}

fn sdk_query(rendered: RenderedQuery) -> Result<Query, Failure> {
    let mut query = Query::from(rendered.text);
    for (name, value) in rendered.parameters {
        query = query
            .with_parameter(name.clone(), value)
            .map_err(|e| Failure::internal(format!("Failed to bind parameter {name}: {e}")))?;
    }
    Ok(query)
}

/// Cosmos DB backed document service
pub struct CosmosDocumentService {
    client: Arc<CosmosDbClient>,
    factory: ContainerFactory,
}

impl CosmosDocumentService {
    /// Create a service over a client and a container factory
    pub fn new(client: CosmosDbClient, factory: ContainerFactory) -> Self {
        Self::new_with_arc(Arc::new(client), factory)
    }

    /// Create a service sharing an Arc-wrapped client
    pub fn new_with_arc(client: Arc<CosmosDbClient>, factory: ContainerFactory) -> Self {
        Self { client, factory }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<CosmosDbClient> {
        &self.client
    }

    /// Get the container factory
    pub fn factory(&self) -> &ContainerFactory {
        &self.factory
    }

    fn location<T: Document>(&self) -> Result<&ContainerLocation, Failure> {
        self.factory
            .resolve::<T>()
            .map_err(|e| Failure::internal(e.to_string()))
    }

    /// Runs an SDK call under the request timeout and classifies its error
    async fn call<R>(
        &self,
        request: impl Future<Output = azure_core::Result<R>>,
    ) -> Result<R, Failure> {
        let timeout = self.client.request_timeout();
        match tokio::time::timeout(timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Failure {
                status: classify_error(&e),
                message: e.to_string(),
            }),
            Err(_) => Err(Failure::internal(format!(
                "Request timed out after {}s",
                timeout.as_secs()
            ))),
        }
    }

    async fn run_query<R>(
        &self,
        location: &ContainerLocation,
        partition_key: &PartitionKeyValue,
        rendered: RenderedQuery,
    ) -> Result<Vec<R>, Failure>
    where
        R: serde::de::DeserializeOwned + Send + 'static,
    {
        let container = self.client.container_client(location);
        let query = sdk_query(rendered)?;
        let partition_key = sdk_partition_key(partition_key);

        self.call(async move {
            let mut pager = container.query_items::<R>(query, partition_key, None)?;
            let mut items = Vec::new();
            while let Some(item) = pager.next().await {
                items.push(item?);
            }
            Ok::<_, azure_core::Error>(items)
        })
        .await
    }

    async fn write<T: Document>(&self, mode: WriteMode, document: &T) -> StoreResult {
        let operation = mode.as_str();
        let key = document.key();
        log_operation!(operation, T::KIND, key);

        let outcome: Result<(), Failure> = async {
            let location = self.location::<T>()?;
            let body = to_document_body(document).map_err(|e| Failure::internal(e.to_string()))?;
            check_partition_key(&body, &location.partition_key_path, &key.partition_key)
                .map_err(|e| Failure::internal(e.to_string()))?;
            let container = self.client.container_client(location);
            let partition_key = sdk_partition_key(&key.partition_key);

            match mode {
                WriteMode::Create => {
                    self.call(container.create_item(partition_key, body, None))
                        .await?;
                }
                WriteMode::Replace => {
                    self.call(container.replace_item(partition_key, key.id.as_str(), body, None))
                        .await?;
                }
                WriteMode::Upsert => {
                    self.call(container.upsert_item(partition_key, body, None))
                        .await?;
                }
            }
            Ok::<_, Failure>(())
        }
        .await;

        match outcome {
            Ok(()) => {
                tracing::debug!(operation, kind = T::KIND, target = %key, "Store operation completed");
                StoreResult::success()
            }
            Err(f) => store_failure(operation, T::KIND, f.status, f.message),
        }
    }
}

#[async_trait]
impl DocumentService for CosmosDocumentService {
    async fn add<T: Document>(&self, document: &T) -> StoreResult {
        self.write(WriteMode::Create, document).await
    }

    async fn get<T: Document>(&self, key: &DocumentKey) -> DataResult<T> {
        log_operation!("get", T::KIND, key);

        let outcome: Result<T, Failure> = async {
            let location = self.location::<T>()?;
            let container = self.client.container_client(location);
            let response = self
                .call(container.read_item::<T>(
                    sdk_partition_key(&key.partition_key),
                    key.id.as_str(),
                    None,
                ))
                .await?;

            response.into_body().map_err(|e| {
                Failure::internal(format!("Failed to deserialize {} {key}: {e}", T::KIND))
            })
        }
        .await;

        match outcome {
            Ok(document) => DataResult::success(document),
            Err(f) => data_failure("get", T::KIND, f.status, f.message),
        }
    }

    async fn update<T: Document>(&self, document: &T) -> StoreResult {
        self.write(WriteMode::Replace, document).await
    }

    async fn upsert<T: Document>(&self, document: &T) -> StoreResult {
        self.write(WriteMode::Upsert, document).await
    }

    async fn delete<T: Document>(&self, key: &DocumentKey) -> StoreResult {
        log_operation!("delete", T::KIND, key);

        let outcome: Result<(), Failure> = async {
            let location = self.location::<T>()?;
            let container = self.client.container_client(location);
            self.call(container.delete_item(
                sdk_partition_key(&key.partition_key),
                key.id.as_str(),
                None,
            ))
            .await?;
            Ok::<_, Failure>(())
        }
        .await;

        match outcome {
            Ok(()) => StoreResult::success(),
            Err(f) => store_failure("delete", T::KIND, f.status, f.message),
        }
    }

    async fn query<T: Document>(&self, query: &DocumentQuery) -> DataResult<Vec<T>> {
        log_operation!("query", T::KIND, query.partition_key());

        let outcome: Result<Vec<T>, Failure> = async {
            let location = self.location::<T>()?;
            let rendered = query
                .to_sql()
                .map_err(|e| Failure::internal(e.to_string()))?;
            tracing::trace!(sql = %rendered.text, "Rendered query");
            self.run_query::<T>(location, query.partition_key(), rendered)
                .await
        }
        .await;

        match outcome {
            Ok(items) if items.is_empty() => DataResult::no_content(items),
            Ok(items) => {
                tracing::debug!(kind = T::KIND, count = items.len(), "Query returned documents");
                DataResult::success(items)
            }
            Err(f) => data_failure("query", T::KIND, f.status, f.message),
        }
    }

    async fn count<T: Document>(&self, query: &DocumentQuery) -> DataResult<u64> {
        log_operation!("count", T::KIND, query.partition_key());

        let outcome: Result<u64, Failure> = async {
            let location = self.location::<T>()?;
            let rendered = query
                .to_count_sql()
                .map_err(|e| Failure::internal(e.to_string()))?;
            let counts = self
                .run_query::<u64>(location, query.partition_key(), rendered)
                .await?;
            Ok::<_, Failure>(counts.into_iter().sum::<u64>())
        }
        .await;

        match outcome {
            Ok(count) => DataResult::success(count),
            Err(f) => data_failure("count", T::KIND, f.status, f.message),
        }
    }
}

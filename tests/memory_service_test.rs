//! Integration tests for the document service result semantics
//!
//! Runs every operation against the in-memory backend.

use docbridge::adapters::cosmosdb::{ContainerFactory, ContainerLocation};
use docbridge::adapters::memory::InMemoryDocumentService;
use docbridge::adapters::store::{DocumentQuery, DocumentService, SortOrder};
use docbridge::domain::{Document, DocumentId, DocumentKey, PartitionKeyValue, ResultStatus};
use serde::{Deserialize, Serialize};
use test_case::test_case;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Order {
    id: DocumentId,
    tenant_id: PartitionKeyValue,
    status: String,
    total: u64,
    #[serde(default)]
    shipping: Option<Shipping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Shipping {
    city: String,
}

impl Document for Order {
    const KIND: &'static str = "order";

    fn id(&self) -> DocumentId {
        self.id.clone()
    }

    fn partition_key(&self) -> PartitionKeyValue {
        self.tenant_id.clone()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Unmapped {
    id: DocumentId,
    tenant: PartitionKeyValue,
}

impl Document for Unmapped {
    const KIND: &'static str = "unmapped";

    fn id(&self) -> DocumentId {
        self.id.clone()
    }

    fn partition_key(&self) -> PartitionKeyValue {
        self.tenant.clone()
    }
}

/// Stores its body partition under `tenantId` but reports `routed_to` as its key
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Misrouted {
    id: DocumentId,
    tenant_id: PartitionKeyValue,
    #[serde(skip)]
    routed_to: Option<PartitionKeyValue>,
}

impl Document for Misrouted {
    const KIND: &'static str = "misrouted";

    fn id(&self) -> DocumentId {
        self.id.clone()
    }

    fn partition_key(&self) -> PartitionKeyValue {
        self.routed_to
            .clone()
            .unwrap_or_else(|| self.tenant_id.clone())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reading {
    id: DocumentId,
    tenant_id: PartitionKeyValue,
    value: f64,
}

impl Document for Reading {
    const KIND: &'static str = "reading";

    fn id(&self) -> DocumentId {
        self.id.clone()
    }

    fn partition_key(&self) -> PartitionKeyValue {
        self.tenant_id.clone()
    }
}

fn service() -> InMemoryDocumentService {
    let mut factory = ContainerFactory::new();
    for (kind, container) in [
        ("order", "orders"),
        ("misrouted", "orders"),
        ("reading", "readings"),
    ] {
        factory.register(
            kind,
            ContainerLocation::new("shop", container).with_partition_key_path("/tenantId"),
        );
    }
    InMemoryDocumentService::new(factory)
}

fn order(id: &str, tenant: &str, status: &str, total: u64) -> Order {
    Order {
        id: DocumentId::new(id).unwrap(),
        tenant_id: PartitionKeyValue::new(tenant).unwrap(),
        status: status.to_string(),
        total,
        shipping: None,
    }
}

fn tenant(value: &str) -> PartitionKeyValue {
    PartitionKeyValue::new(value).unwrap()
}

async fn seeded() -> InMemoryDocumentService {
    let service = service();
    for o in [
        order("o-1", "t-1", "open", 30),
        order("o-2", "t-1", "closed", 10),
        order("o-3", "t-1", "open", 20),
        order("o-4", "t-2", "open", 99),
    ] {
        assert_eq!(service.add(&o).await.status, ResultStatus::Success);
    }
    service
}

#[tokio::test]
async fn test_add_then_get() {
    let service = service();
    let o = order("o-1", "t-1", "open", 30);

    let result = service.add(&o).await;
    assert!(result.is_success());

    let result = service.get::<Order>(&o.key()).await;
    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.into_data(), Some(o));
}

#[tokio::test]
async fn test_add_existing_is_conflict() {
    let service = service();
    let o = order("o-1", "t-1", "open", 30);
    service.add(&o).await;

    let result = service.add(&o).await;
    assert_eq!(result.status, ResultStatus::Conflict);
    assert!(result.message.is_some());
    assert_eq!(service.len().await, 1);
}

#[tokio::test]
async fn test_same_id_in_other_partition_is_distinct() {
    let service = service();
    assert!(service.add(&order("o-1", "t-1", "open", 1)).await.is_success());
    assert!(service.add(&order("o-1", "t-2", "open", 2)).await.is_success());

    let key = DocumentKey::parse("o-1", "t-2").unwrap();
    let result = service.get::<Order>(&key).await;
    assert_eq!(result.into_data().map(|o| o.total), Some(2));
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let service = service();
    let key = DocumentKey::parse("nope", "t-1").unwrap();

    let result = service.get::<Order>(&key).await;
    assert_eq!(result.status, ResultStatus::NotFound);
    assert!(result.data().is_none());
    assert!(result.into_result().is_err());
}

#[tokio::test]
async fn test_update_replaces_existing() {
    let service = service();
    let mut o = order("o-1", "t-1", "open", 30);
    service.add(&o).await;

    o.status = "closed".to_string();
    o.shipping = Some(Shipping {
        city: "Oslo".to_string(),
    });
    assert_eq!(service.update(&o).await.status, ResultStatus::Success);

    let stored = service.get::<Order>(&o.key()).await.into_data().unwrap();
    assert_eq!(stored, o);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let service = service();
    let result = service.update(&order("o-1", "t-1", "open", 30)).await;
    assert_eq!(result.status, ResultStatus::NotFound);
    assert!(service.is_empty().await);
}

#[tokio::test]
async fn test_upsert_creates_then_replaces() {
    let service = service();
    let mut o = order("o-1", "t-1", "open", 30);

    assert_eq!(service.upsert(&o).await.status, ResultStatus::Success);
    o.total = 31;
    assert_eq!(service.upsert(&o).await.status, ResultStatus::Success);

    assert_eq!(service.len().await, 1);
    let stored = service.get::<Order>(&o.key()).await.into_data().unwrap();
    assert_eq!(stored.total, 31);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let service = service();
    let o = order("o-1", "t-1", "open", 30);
    service.add(&o).await;

    assert_eq!(service.delete::<Order>(&o.key()).await.status, ResultStatus::Success);
    assert_eq!(service.delete::<Order>(&o.key()).await.status, ResultStatus::NotFound);
    assert_eq!(service.get::<Order>(&o.key()).await.status, ResultStatus::NotFound);
}

#[tokio::test]
async fn test_exists() {
    let service = service();
    let o = order("o-1", "t-1", "open", 30);
    service.add(&o).await;

    let present = service.exists::<Order>(&o.key()).await;
    assert_eq!(present.status, ResultStatus::Success);
    assert_eq!(present.into_data(), Some(true));

    let missing = DocumentKey::parse("o-2", "t-1").unwrap();
    let absent = service.exists::<Order>(&missing).await;
    assert_eq!(absent.status, ResultStatus::Success);
    assert_eq!(absent.into_data(), Some(false));
}

#[tokio::test]
async fn test_unmapped_kind_is_internal_error() {
    let service = service();
    let doc = Unmapped {
        id: DocumentId::new("u-1").unwrap(),
        tenant: tenant("t-1"),
    };

    assert_eq!(service.add(&doc).await.status, ResultStatus::InternalError);
    assert_eq!(service.upsert(&doc).await.status, ResultStatus::InternalError);
    assert_eq!(
        service.get::<Unmapped>(&doc.key()).await.status,
        ResultStatus::InternalError
    );
    assert_eq!(
        service.exists::<Unmapped>(&doc.key()).await.status,
        ResultStatus::InternalError
    );

    let query = DocumentQuery::in_partition(tenant("t-1"));
    assert_eq!(
        service.count::<Unmapped>(&query).await.status,
        ResultStatus::InternalError
    );
}

#[tokio::test]
async fn test_query_filters_orders_and_limits() {
    let service = seeded().await;

    let query = DocumentQuery::in_partition(tenant("t-1"))
        .where_eq("status", "open")
        .order_by("total", SortOrder::Ascending);
    let result = service.query::<Order>(&query).await;
    assert_eq!(result.status, ResultStatus::Success);
    let ids: Vec<String> = result
        .into_data()
        .unwrap()
        .into_iter()
        .map(|o| o.id.into_inner())
        .collect();
    assert_eq!(ids, vec!["o-3", "o-1"]);

    let query = DocumentQuery::in_partition(tenant("t-1"))
        .order_by("total", SortOrder::Descending)
        .limit(2);
    let totals: Vec<u64> = service
        .query::<Order>(&query)
        .await
        .into_data()
        .unwrap()
        .into_iter()
        .map(|o| o.total)
        .collect();
    assert_eq!(totals, vec![30, 20]);
}

#[tokio::test]
async fn test_query_nested_path() {
    let service = service();
    let mut o = order("o-1", "t-1", "open", 30);
    o.shipping = Some(Shipping {
        city: "Oslo".to_string(),
    });
    service.add(&o).await;
    service.add(&order("o-2", "t-1", "open", 10)).await;

    let query = DocumentQuery::in_partition(tenant("t-1")).where_eq("shipping.city", "Oslo");
    let result = service.query::<Order>(&query).await;
    assert_eq!(result.into_data().unwrap(), vec![o]);
}

#[tokio::test]
async fn test_empty_query_is_no_content() {
    let service = seeded().await;

    let query = DocumentQuery::in_partition(tenant("t-1")).where_eq("status", "cancelled");
    let result = service.query::<Order>(&query).await;

    assert_eq!(result.status, ResultStatus::NoContent);
    assert_eq!(result.data().map(Vec::len), Some(0));
}

#[test_case("t-1", None, 3 ; "whole partition")]
#[test_case("t-1", Some("open"), 2 ; "filtered")]
#[test_case("t-2", Some("open"), 1 ; "other partition")]
#[test_case("t-3", None, 0 ; "empty partition")]
#[tokio::test]
async fn test_count(partition: &str, status: Option<&str>, expected: u64) {
    let service = seeded().await;

    let mut query = DocumentQuery::in_partition(tenant(partition)).limit(1);
    if let Some(status) = status {
        query = query.where_eq("status", status);
    }

    let result = service.count::<Order>(&query).await;
    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.into_data(), Some(expected));
}

#[tokio::test]
async fn test_raw_sql_is_internal_error() {
    let service = seeded().await;
    let query = DocumentQuery::sql(tenant("t-1"), "SELECT * FROM c WHERE c.total > @min")
        .with_parameter("@min", 15);

    let result = service.query::<Order>(&query).await;
    assert_eq!(result.status, ResultStatus::InternalError);
    assert!(result.message.unwrap().contains("Raw SQL"));
}

#[tokio::test]
async fn test_filter_on_raw_sql_is_internal_error() {
    let service = seeded().await;
    let query = DocumentQuery::sql(tenant("t-1"), "SELECT * FROM c").where_eq("status", "open");

    let result = service.count::<Order>(&query).await;
    assert_eq!(result.status, ResultStatus::InternalError);
    assert!(result.message.unwrap().contains("where_eq"));
}

#[tokio::test]
async fn test_parameter_on_structured_query_is_internal_error() {
    let service = seeded().await;
    let query = DocumentQuery::in_partition(tenant("t-1"))
        .where_eq("status", "open")
        .with_parameter("@min", 15);

    let result = service.query::<Order>(&query).await;
    assert_eq!(result.status, ResultStatus::InternalError);
    assert!(result.data().is_none());
}

#[tokio::test]
async fn test_numeric_filter_matches_across_number_forms() {
    let service = service();
    let reading = Reading {
        id: DocumentId::new("r-1").unwrap(),
        tenant_id: tenant("t-1"),
        value: 30.0,
    };
    assert!(service.add(&reading).await.is_success());

    let query = DocumentQuery::in_partition(tenant("t-1")).where_eq("value", 30);
    let result = service.count::<Reading>(&query).await;
    assert_eq!(result.into_data(), Some(1));

    let query = DocumentQuery::in_partition(tenant("t-1")).where_eq("value", 30.5);
    let result = service.count::<Reading>(&query).await;
    assert_eq!(result.into_data(), Some(0));
}

#[tokio::test]
async fn test_body_partition_mismatch_is_internal_error() {
    let service = service();
    let doc = Misrouted {
        id: DocumentId::new("o-1").unwrap(),
        tenant_id: tenant("OTHER"),
        routed_to: Some(tenant("t-1")),
    };

    let result = service.add(&doc).await;
    assert_eq!(result.status, ResultStatus::InternalError);
    assert!(result.message.unwrap().contains("Partition key mismatch"));
    assert_eq!(service.upsert(&doc).await.status, ResultStatus::InternalError);
    assert_eq!(service.update(&doc).await.status, ResultStatus::InternalError);
    assert!(service.is_empty().await);

    let consistent = Misrouted {
        routed_to: None,
        ..doc
    };
    assert!(service.add(&consistent).await.is_success());
}

#[tokio::test]
async fn test_invalid_path_is_internal_error() {
    let service = seeded().await;
    let query = DocumentQuery::in_partition(tenant("t-1")).where_eq("shipping..city", "Oslo");

    let result = service.query::<Order>(&query).await;
    assert_eq!(result.status, ResultStatus::InternalError);
}

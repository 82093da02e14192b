//! In-memory implementation of [`DocumentService`]

use crate::adapters::cosmosdb::factory::ContainerFactory;
use crate::adapters::cosmosdb::status::{data_failure, store_failure};
use crate::adapters::store::query::{path_segments, DocumentQuery, EqFilter, QueryBody, SortOrder};
use crate::adapters::store::traits::DocumentService;
use crate::domain::{
    check_partition_key, to_document_body, DataResult, DocBridgeError, Document, DocumentKey, Result, ResultStatus,
    StoreResult,
};
use crate::log_operation;
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// `(location, partition key, id)`
type EntryKey = (String, String, String);

/// Document service that keeps everything in process memory
///
/// Containers are resolved through the same [`ContainerFactory`] as the
/// Cosmos DB service, so unmapped kinds fail the same way. Raw SQL queries
/// are not evaluated and report `InternalError`.
pub struct InMemoryDocumentService {
    factory: ContainerFactory,
    documents: RwLock<BTreeMap<EntryKey, Value>>,
}

impl InMemoryDocumentService {
    pub fn new(factory: ContainerFactory) -> Self {
        Self {
            factory,
            documents: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn factory(&self) -> &ContainerFactory {
        &self.factory
    }

    /// Number of stored documents across all containers
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn entry_key<T: Document>(&self, key: &DocumentKey) -> Result<EntryKey> {
        let location = self.factory.resolve::<T>()?;
        Ok((
            location.to_string(),
            key.partition_key.as_str().to_string(),
            key.id.as_str().to_string(),
        ))
    }

    fn prepare<T: Document>(&self, document: &T) -> Result<(EntryKey, Value)> {
        let key = document.key();
        let location = self.factory.resolve::<T>()?;
        let body = to_document_body(document)?;
        check_partition_key(&body, &location.partition_key_path, &key.partition_key)?;
        let entry = (
            location.to_string(),
            key.partition_key.as_str().to_string(),
            key.id.as_str().to_string(),
        );
        Ok((entry, body))
    }

    /// Documents in the query's partition that pass its filters
    async fn matching<T: Document>(&self, query: &DocumentQuery) -> Result<Vec<Value>> {
        query.validate()?;
        let structured = match query.body() {
            QueryBody::Structured(q) => q,
            QueryBody::Sql(_) => {
                return Err(DocBridgeError::Validation(
                    "Raw SQL queries are not supported by the in-memory store".to_string(),
                ))
            }
        };

        let location = self.factory.resolve::<T>()?.to_string();
        let partition_key = query.partition_key().as_str();

        let filters = structured
            .filters
            .iter()
            .map(|f| -> Result<(Vec<&str>, &EqFilter)> { Ok((path_segments(&f.path)?, f)) })
            .collect::<Result<Vec<_>>>()?;

        let documents = self.documents.read().await;
        let mut matched: Vec<Value> = documents
            .iter()
            .filter(|((loc, pk, _), _)| *loc == location && pk == partition_key)
            .map(|(_, body)| body)
            .filter(|body| {
                filters
                    .iter()
                    .all(|(segments, f)| values_equal(lookup(body, segments), &f.value))
            })
            .cloned()
            .collect();
        drop(documents);

        if let Some((path, order)) = &structured.order_by {
            let segments = path_segments(path)?;
            matched.sort_by(|a, b| {
                let ordering = compare_values(lookup(a, &segments), lookup(b, &segments));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        Ok(matched)
    }
}

fn lookup<'a>(body: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(body, |value, segment| value.get(*segment))
}

/// JSON equality with numbers compared by value, so `30` equals `30.0`
fn values_equal(stored: Option<&Value>, expected: &Value) -> bool {
    match (stored, expected) {
        (Some(Value::Number(x)), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Some(Value::Array(xs)), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(Some(x), y))
        }
        (Some(Value::Object(xs)), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(name, x)| ys.get(name).is_some_and(|y| values_equal(Some(x), y)))
        }
        (Some(stored), expected) => stored == expected,
        (None, _) => false,
    }
}

/// Orders missing < null < bool < number < string < array < object
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(Value::Array(_)) => 5,
            Some(Value::Object(_)) => 6,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn decode<T: Document>(body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(DocBridgeError::from)
}

#[async_trait]
impl DocumentService for InMemoryDocumentService {
    async fn add<T: Document>(&self, document: &T) -> StoreResult {
        let key = document.key();
        log_operation!("add", T::KIND, key);

        let (entry, body) = match self.prepare(document) {
            Ok(prepared) => prepared,
            Err(e) => {
                return store_failure("add", T::KIND, ResultStatus::InternalError, e.to_string())
            }
        };

        let mut documents = self.documents.write().await;
        if documents.contains_key(&entry) {
            return store_failure(
                "add",
                T::KIND,
                ResultStatus::Conflict,
                format!("Document {key} already exists"),
            );
        }
        documents.insert(entry, body);
        StoreResult::success()
    }

    async fn get<T: Document>(&self, key: &DocumentKey) -> DataResult<T> {
        log_operation!("get", T::KIND, key);

        let entry = match self.entry_key::<T>(key) {
            Ok(entry) => entry,
            Err(e) => {
                return data_failure("get", T::KIND, ResultStatus::InternalError, e.to_string())
            }
        };

        let body = self.documents.read().await.get(&entry).cloned();
        match body {
            Some(body) => match decode::<T>(body) {
                Ok(document) => DataResult::success(document),
                Err(e) => data_failure("get", T::KIND, ResultStatus::InternalError, e.to_string()),
            },
            None => data_failure(
                "get",
                T::KIND,
                ResultStatus::NotFound,
                format!("Document {key} not found"),
            ),
        }
    }

    async fn update<T: Document>(&self, document: &T) -> StoreResult {
        let key = document.key();
        log_operation!("update", T::KIND, key);

        let (entry, body) = match self.prepare(document) {
            Ok(prepared) => prepared,
            Err(e) => {
                return store_failure("update", T::KIND, ResultStatus::InternalError, e.to_string())
            }
        };

        let mut documents = self.documents.write().await;
        match documents.get_mut(&entry) {
            Some(existing) => {
                *existing = body;
                StoreResult::success()
            }
            None => store_failure(
                "update",
                T::KIND,
                ResultStatus::NotFound,
                format!("Document {key} not found"),
            ),
        }
    }

    async fn upsert<T: Document>(&self, document: &T) -> StoreResult {
        let key = document.key();
        log_operation!("upsert", T::KIND, key);

        match self.prepare(document) {
            Ok((entry, body)) => {
                self.documents.write().await.insert(entry, body);
                StoreResult::success()
            }
            Err(e) => store_failure("upsert", T::KIND, ResultStatus::InternalError, e.to_string()),
        }
    }

    async fn delete<T: Document>(&self, key: &DocumentKey) -> StoreResult {
        log_operation!("delete", T::KIND, key);

        let entry = match self.entry_key::<T>(key) {
            Ok(entry) => entry,
            Err(e) => {
                return store_failure("delete", T::KIND, ResultStatus::InternalError, e.to_string())
            }
        };

        match self.documents.write().await.remove(&entry) {
            Some(_) => StoreResult::success(),
            None => store_failure(
                "delete",
                T::KIND,
                ResultStatus::NotFound,
                format!("Document {key} not found"),
            ),
        }
    }

    async fn query<T: Document>(&self, query: &DocumentQuery) -> DataResult<Vec<T>> {
        log_operation!("query", T::KIND, query.partition_key());

        let outcome = async {
            let mut matched = self.matching::<T>(query).await?;
            if let QueryBody::Structured(q) = query.body() {
                if let Some(limit) = q.limit {
                    matched.truncate(limit as usize);
                }
            }
            matched.into_iter().map(decode::<T>).collect::<Result<Vec<T>>>()
        }
        .await;

        match outcome {
            Ok(items) if items.is_empty() => DataResult::no_content(items),
            Ok(items) => DataResult::success(items),
            Err(e) => data_failure("query", T::KIND, ResultStatus::InternalError, e.to_string()),
        }
    }

    async fn count<T: Document>(&self, query: &DocumentQuery) -> DataResult<u64> {
        log_operation!("count", T::KIND, query.partition_key());

        match self.matching::<T>(query).await {
            Ok(matched) => DataResult::success(matched.len() as u64),
            Err(e) => data_failure("count", T::KIND, ResultStatus::InternalError, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(None, Some(json!(null)), Ordering::Less ; "missing before null")]
    #[test_case(Some(json!(false)), Some(json!(true)), Ordering::Less ; "booleans")]
    #[test_case(Some(json!(2)), Some(json!(10)), Ordering::Less ; "numbers compare numerically")]
    #[test_case(Some(json!(1.5)), Some(json!(1)), Ordering::Greater ; "mixed number forms")]
    #[test_case(Some(json!("b")), Some(json!("a")), Ordering::Greater ; "strings")]
    #[test_case(Some(json!(99)), Some(json!("1")), Ordering::Less ; "numbers before strings")]
    fn test_compare_values(a: Option<Value>, b: Option<Value>, expected: Ordering) {
        assert_eq!(compare_values(a.as_ref(), b.as_ref()), expected);
    }

    #[test_case(Some(json!(30.0)), json!(30), true ; "float equals integer")]
    #[test_case(Some(json!(30)), json!(30.0), true ; "integer equals float")]
    #[test_case(Some(json!(30.5)), json!(30), false ; "different numbers")]
    #[test_case(Some(json!([1, 2.0])), json!([1.0, 2]), true ; "arrays by value")]
    #[test_case(Some(json!({"a": 1.0})), json!({"a": 1}), true ; "objects by value")]
    #[test_case(Some(json!({"a": 1})), json!({"a": 1, "b": 2}), false ; "objects with extra field")]
    #[test_case(Some(json!("30")), json!(30), false ; "string is not a number")]
    #[test_case(None, json!(null), false ; "missing is not null")]
    fn test_values_equal(stored: Option<Value>, expected: Value, equal: bool) {
        assert_eq!(values_equal(stored.as_ref(), &expected), equal);
    }

    #[test]
    fn test_lookup_nested_path() {
        let body = json!({"address": {"city": "Oslo"}, "tags": ["a"]});
        assert_eq!(lookup(&body, &["address", "city"]), Some(&json!("Oslo")));
        assert_eq!(lookup(&body, &["address", "zip"]), None);
        assert_eq!(lookup(&body, &["tags", "city"]), None);
    }
}

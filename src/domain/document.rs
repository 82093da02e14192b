//! The `Document` trait implemented by every stored type

use super::errors::DocBridgeError;
use super::ids::{DocumentId, DocumentKey, PartitionKeyValue};
use super::result::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A type that can be stored through a [`crate::adapters::store::DocumentService`]
///
/// `KIND` is the logical type name; the container factory maps it to a
/// database/container pair.
///
/// # Examples
///
/// ```
/// use docbridge::domain::{Document, DocumentId, PartitionKeyValue};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Customer {
///     id: DocumentId,
///     tenant: PartitionKeyValue,
///     name: String,
/// }
///
/// impl Document for Customer {
///     const KIND: &'static str = "customer";
///
///     fn id(&self) -> DocumentId {
///         self.id.clone()
///     }
///
///     fn partition_key(&self) -> PartitionKeyValue {
///         self.tenant.clone()
///     }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Logical type name used for container resolution
    const KIND: &'static str;

    /// The document id
    fn id(&self) -> DocumentId;

    /// The partition key value
    fn partition_key(&self) -> PartitionKeyValue;

    /// The lookup key for this document
    fn key(&self) -> DocumentKey {
        DocumentKey::new(self.id(), self.partition_key())
    }
}

/// Serializes a document into the JSON body sent to the service
///
/// The body must be a JSON object; its `id` property is set to
/// [`Document::id`] so the stored id always matches the lookup key.
pub fn to_document_body<T: Document>(document: &T) -> Result<Value> {
    let mut body = serde_json::to_value(document)?;
    let object = body.as_object_mut().ok_or_else(|| {
        DocBridgeError::Serialization(format!(
            "Document of kind '{}' must serialize to a JSON object",
            T::KIND
        ))
    })?;
    object.insert("id".to_string(), Value::String(document.id().into_inner()));
    Ok(body)
}

/// Checks that the body carries the partition key at `partition_key_path`
///
/// `partition_key_path` uses the container form, `/tenantId` or `/a/b`.
/// The value there must be a string equal to `expected`.
pub fn check_partition_key(
    body: &Value,
    partition_key_path: &str,
    expected: &PartitionKeyValue,
) -> Result<()> {
    let found = partition_key_path
        .trim_start_matches('/')
        .split('/')
        .try_fold(body, |value, segment| value.get(segment));

    match found {
        Some(Value::String(value)) if value == expected.as_str() => Ok(()),
        Some(other) => Err(DocBridgeError::Validation(format!(
            "Partition key mismatch: body has {other} at '{partition_key_path}', key is '{expected}'"
        ))),
        None => Err(DocBridgeError::Validation(format!(
            "Partition key mismatch: body has no value at '{partition_key_path}', key is '{expected}'"
        ))),
    }
}

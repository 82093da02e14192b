//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for the values that address a
//! document: its id and its partition key value. Together they form a
//! [`DocumentKey`], the lookup key for point operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a document id accepted by the service
pub const MAX_DOCUMENT_ID_LENGTH: usize = 255;

/// Characters the service rejects inside resource ids
const FORBIDDEN_ID_CHARS: [char; 4] = ['/', '\\', '?', '#'];

/// Document identifier newtype wrapper
///
/// Represents the `id` property of a stored document. Ids are unique within
/// a logical partition.
///
/// # Examples
///
/// ```
/// use docbridge::domain::ids::DocumentId;
/// use std::str::FromStr;
///
/// let id = DocumentId::from_str("order-1001").unwrap();
/// assert_eq!(id.as_str(), "order-1001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId from a string
    ///
    /// # Returns
    ///
    /// Returns `Err` if the id is empty, longer than
    /// [`MAX_DOCUMENT_ID_LENGTH`] characters, or contains `/`, `\`, `?` or `#`
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Document ID cannot be empty".to_string());
        }

        if id.chars().count() > MAX_DOCUMENT_ID_LENGTH {
            return Err(format!(
                "Document ID cannot be longer than {MAX_DOCUMENT_ID_LENGTH} characters"
            ));
        }

        if let Some(c) = id.chars().find(|c| FORBIDDEN_ID_CHARS.contains(c)) {
            return Err(format!(
                "Document ID '{id}' contains forbidden character '{c}'"
            ));
        }

        Ok(Self(id))
    }

    /// Generates a new random document id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the document ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Partition key value newtype wrapper
///
/// The value the service uses to route and co-locate a document.
///
/// # Examples
///
/// ```
/// use docbridge::domain::ids::PartitionKeyValue;
///
/// let pk = PartitionKeyValue::new("tenant-42").unwrap();
/// assert_eq!(pk.as_str(), "tenant-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartitionKeyValue(String);

impl PartitionKeyValue {
    /// Creates a new PartitionKeyValue from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(PartitionKeyValue)` if the value is non-empty, `Err` otherwise
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err("Partition key value cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    /// Returns the partition key value as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PartitionKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PartitionKeyValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PartitionKeyValue {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PartitionKeyValue> for String {
    fn from(pk: PartitionKeyValue) -> Self {
        pk.0
    }
}

impl AsRef<str> for PartitionKeyValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lookup key for point operations: document id plus partition key value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    /// Document id
    pub id: DocumentId,

    /// Partition key value
    pub partition_key: PartitionKeyValue,
}

impl DocumentKey {
    /// Creates a key from already validated parts
    pub fn new(id: DocumentId, partition_key: PartitionKeyValue) -> Self {
        Self { id, partition_key }
    }

    /// Parses and validates both parts of a key
    pub fn parse(id: &str, partition_key: &str) -> Result<Self, String> {
        Ok(Self {
            id: DocumentId::new(id)?,
            partition_key: PartitionKeyValue::new(partition_key)?,
        })
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.partition_key, self.id)
    }
}

//! Domain models and types for Docbridge.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DocumentId`], [`PartitionKeyValue`], [`DocumentKey`])
//! - **The stored-type contract** ([`Document`])
//! - **Operation outcomes** ([`StoreResult`], [`DataResult`], [`ResultStatus`])
//! - **Error types** ([`DocBridgeError`], [`CosmosDbError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern, so a partition key value can't be
//! passed where a document id is expected:
//!
//! ```rust
//! use docbridge::domain::{DocumentId, DocumentKey, PartitionKeyValue};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let id = DocumentId::new("order-1001")?;
//! let pk = PartitionKeyValue::new("tenant-42")?;
//! let key = DocumentKey::new(id, pk);
//! assert_eq!(key.to_string(), "tenant-42/order-1001");
//! # Ok(())
//! # }
//! ```
//!
//! # Outcomes
//!
//! Store operations classify their outcome instead of returning SDK errors.
//! Use `into_result()` to switch back to `?`-style propagation:
//!
//! ```rust
//! use docbridge::domain::{DataResult, Result};
//!
//! fn total(result: DataResult<u64>) -> Result<u64> {
//!     result.into_result()
//! }
//! ```

pub mod document;
pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{check_partition_key, to_document_body, Document};
pub use errors::{CosmosDbError, DocBridgeError};
pub use ids::{DocumentId, DocumentKey, PartitionKeyValue};
pub use result::{DataResult, Result, ResultStatus, StoreResult};

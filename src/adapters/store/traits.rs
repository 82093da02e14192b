//! Document store abstraction
//!
//! This module defines the trait every store backend implements. Methods
//! never fail with an error type: each outcome is classified into a
//! [`StoreResult`] or [`DataResult`].

use crate::adapters::store::query::DocumentQuery;
use crate::domain::{DataResult, Document, DocumentKey, ResultStatus, StoreResult};
use async_trait::async_trait;

/// CRUD and query operations over typed documents
///
/// The container a call targets is resolved from `T::KIND`.
///
/// | operation | success | classified failures |
/// |-----------|---------|---------------------|
/// | `add` | `Success` | `Conflict` if the id exists |
/// | `get` | `Success(T)` | `NotFound` |
/// | `update` | `Success` | `NotFound` |
/// | `upsert` | `Success` | |
/// | `delete` | `Success` | `NotFound` |
/// | `query` | `Success(items)`, `NoContent(empty)` | |
/// | `count` | `Success(n)` | |
///
/// Every operation can also report `Throttled` or `InternalError`.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Creates a new document
    async fn add<T: Document>(&self, document: &T) -> StoreResult;

    /// Reads a document by key
    async fn get<T: Document>(&self, key: &DocumentKey) -> DataResult<T>;

    /// Replaces an existing document
    async fn update<T: Document>(&self, document: &T) -> StoreResult;

    /// Creates or replaces a document
    async fn upsert<T: Document>(&self, document: &T) -> StoreResult;

    /// Deletes a document by key
    async fn delete<T: Document>(&self, key: &DocumentKey) -> StoreResult;

    /// Runs a single-partition query
    async fn query<T: Document>(&self, query: &DocumentQuery) -> DataResult<Vec<T>>;

    /// Counts the documents a query matches
    async fn count<T: Document>(&self, query: &DocumentQuery) -> DataResult<u64>;

    /// Checks whether a document exists
    ///
    /// `NotFound` becomes `Success(false)`; other failures pass through.
    async fn exists<T: Document>(&self, key: &DocumentKey) -> DataResult<bool> {
        let result = self.get::<T>(key).await;
        match result.status {
            ResultStatus::NotFound => DataResult::success(false),
            _ => result.map(|_| true),
        }
    }
}

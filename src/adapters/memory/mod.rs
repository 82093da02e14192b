//! In-process document store
//!
//! Backs the [`DocumentService`](crate::adapters::store::DocumentService)
//! trait with a map guarded by an async lock. Used by tests and local runs
//! without a Cosmos DB account.

pub mod service;

pub use service::InMemoryDocumentService;

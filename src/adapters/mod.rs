//! Storage adapters
//!
//! - [`store`]: the [`DocumentService`](store::DocumentService) trait, queries and the service factory
//! - [`cosmosdb`]: Azure Cosmos DB client, container mappings and service
//! - [`memory`]: in-process service with the same result semantics

pub mod cosmosdb;
pub mod memory;
pub mod store;

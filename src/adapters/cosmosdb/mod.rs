//! Azure Cosmos DB integration
//!
//! This module provides the SDK client, the kind-to-container mapping and
//! the [`DocumentService`](crate::adapters::store::DocumentService)
//! implementation backed by Cosmos DB.

pub mod client;
pub mod factory;
pub mod service;
pub mod status;

pub use client::CosmosDbClient;
pub use factory::{ContainerFactory, ContainerLocation};
pub use service::CosmosDocumentService;
pub use status::{classify_error, classify_error_text, classify_status};

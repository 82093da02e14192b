// Docbridge - Typed document access for Azure Cosmos DB
// Copyright (c) 2025 Docbridge Contributors
// Licensed under the MIT License

//! # Docbridge - Typed document access for Azure Cosmos DB
//!
//! Docbridge is a thin data-access layer over the Azure Cosmos DB SDK. It
//! configures a client from a TOML file, maps each document type to a
//! database/container pair, and exposes CRUD and query helpers that report a
//! classified outcome instead of SDK errors.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`adapters`] - Document services (Cosmos DB, in-memory) and queries
//! - [`domain`] - Identifiers, the `Document` trait and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docbridge::adapters::store::{create_document_service, DocumentService};
//! use docbridge::config::load_config;
//! use docbridge::domain::{Document, DocumentId, PartitionKeyValue, ResultStatus};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Order {
//!     id: DocumentId,
//!     tenant: PartitionKeyValue,
//!     total: u64,
//! }
//!
//! impl Document for Order {
//!     const KIND: &'static str = "order";
//!
//!     fn id(&self) -> DocumentId {
//!         self.id.clone()
//!     }
//!
//!     fn partition_key(&self) -> PartitionKeyValue {
//!         self.tenant.clone()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("docbridge.toml")?;
//!     let service = create_document_service(&config).await?;
//!
//!     let order = Order {
//!         id: DocumentId::new("order-1001")?,
//!         tenant: PartitionKeyValue::new("tenant-42")?,
//!         total: 1999,
//!     };
//!
//!     match service.add(&order).await.status {
//!         ResultStatus::Success => println!("stored"),
//!         ResultStatus::Conflict => println!("already exists"),
//!         status => println!("failed: {status}"),
//!     }
//!
//!     let stored = service.get::<Order>(&order.key()).await.into_result()?;
//!     println!("total = {}", stored.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Queries
//!
//! Queries are scoped to one partition:
//!
//! ```rust,no_run
//! use docbridge::adapters::store::{DocumentQuery, SortOrder};
//! use docbridge::domain::PartitionKeyValue;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let query = DocumentQuery::in_partition(PartitionKeyValue::new("tenant-42")?)
//!     .where_eq("status", "open")
//!     .order_by("total", SortOrder::Descending)
//!     .limit(20);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Setup code returns [`domain::DocBridgeError`]; store operations return
//! [`domain::StoreResult`] or [`domain::DataResult`], which convert back with
//! `into_result()`.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;

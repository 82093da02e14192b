//! Backend-neutral store interface
//!
//! This module holds the [`DocumentService`] trait, the query builder shared
//! by every backend and the factory that builds the Cosmos DB service from
//! configuration.

pub mod factory;
pub mod query;
pub mod traits;

pub use factory::{create_container_factory, create_document_service};
pub use query::{DocumentQuery, EqFilter, QueryBody, RenderedQuery, SortOrder, SqlQuery, StructuredQuery};
pub use traits::DocumentService;

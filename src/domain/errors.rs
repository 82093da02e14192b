//! Domain error types
//!
//! This module defines the error hierarchy for Docbridge.
//! All errors are domain-specific and don't expose third-party SDK types.

use thiserror::Error;

/// Main Docbridge error type
///
/// This is the primary error type used throughout the crate. Service
/// operations report outcomes through [`super::StoreResult`] and
/// [`super::DataResult`]; this type appears when those are converted with
/// `into_result()` and in setup code (configuration, connection, bootstrap).
#[derive(Debug, Error)]
pub enum DocBridgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cosmos DB-related errors
    #[error("Cosmos DB error: {0}")]
    CosmosDb(#[from] CosmosDbError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Cosmos DB-specific errors
///
/// Errors that occur when interacting with Azure Cosmos DB.
#[derive(Debug, Error)]
pub enum CosmosDbError {
    /// Failed to connect to Cosmos DB
    #[error("Failed to connect to Cosmos DB: {0}")]
    ConnectionFailed(String),

    /// Failed to create database
    #[error("Failed to create database: {0}")]
    DatabaseCreationFailed(String),

    /// Failed to create container
    #[error("Failed to create container: {0}")]
    ContainerCreationFailed(String),

    /// No container is mapped for a document kind
    #[error("No container mapped for document kind '{0}'")]
    ContainerNotMapped(String),

    /// Document not found (404)
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Conflict error (409, 412)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Throttling error (429)
    #[error("Request rate too large (429): {0}")]
    Throttled(String),

    /// The operation succeeded without returning a payload
    #[error("No content: {0}")]
    NoContent(String),

    /// Failed to query documents
    #[error("Failed to query documents: {0}")]
    QueryFailed(String),

    /// Any other failed request
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to deserialize response
    #[error("Failed to deserialize response: {0}")]
    DeserializationFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for DocBridgeError {
    fn from(err: std::io::Error) -> Self {
        DocBridgeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DocBridgeError {
    fn from(err: serde_json::Error) -> Self {
        DocBridgeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DocBridgeError {
    fn from(err: toml::de::Error) -> Self {
        DocBridgeError::Configuration(format!("TOML parse error: {err}"))
    }
}

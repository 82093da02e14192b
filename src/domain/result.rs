//! Result types for Docbridge
//!
//! This module provides the crate-wide `Result` alias and the two outcome
//! types every store operation returns: [`StoreResult`] for operations
//! without a payload and [`DataResult`] for operations that produce one.
//! Store operations never return SDK errors; they classify the outcome into
//! a [`ResultStatus`] instead.

use super::errors::{CosmosDbError, DocBridgeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type alias for Docbridge operations
///
/// # Examples
///
/// ```
/// use docbridge::domain::result::Result;
/// use docbridge::domain::errors::DocBridgeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DocBridgeError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DocBridgeError>;

/// Classified outcome of a store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// The operation succeeded (200, 201)
    Success,
    /// The operation succeeded without content (204, empty query result)
    NoContent,
    /// The addressed document does not exist (404)
    NotFound,
    /// The write conflicts with the stored state (409, 412)
    Conflict,
    /// The request was rate limited (429)
    Throttled,
    /// Any other failure
    InternalError,
}

impl ResultStatus {
    /// Whether the status denotes a successful operation
    pub fn is_success(self) -> bool {
        matches!(self, ResultStatus::Success | ResultStatus::NoContent)
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultStatus::Success => "success",
            ResultStatus::NoContent => "no_content",
            ResultStatus::NotFound => "not_found",
            ResultStatus::Conflict => "conflict",
            ResultStatus::Throttled => "throttled",
            ResultStatus::InternalError => "internal_error",
        };
        write!(f, "{s}")
    }
}

/// Outcome of an operation without payload (add, update, upsert, delete)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResult {
    /// Classified status
    pub status: ResultStatus,

    /// Failure detail, if any
    pub message: Option<String>,
}

impl StoreResult {
    /// Builds a result from a status and optional message
    pub fn from_status(status: ResultStatus, message: Option<String>) -> Self {
        Self { status, message }
    }

    pub fn success() -> Self {
        Self::from_status(ResultStatus::Success, None)
    }

    pub fn no_content() -> Self {
        Self::from_status(ResultStatus::NoContent, None)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::from_status(ResultStatus::NotFound, Some(message.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::from_status(ResultStatus::Conflict, Some(message.into()))
    }

    pub fn throttled(message: impl Into<String>) -> Self {
        Self::from_status(ResultStatus::Throttled, Some(message.into()))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::from_status(ResultStatus::InternalError, Some(message.into()))
    }

    /// Whether the operation succeeded
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Converts into a `Result` so callers can use `?`
    pub fn into_result(self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }
        Err(failure_error(self.status, self.message))
    }
}

/// Outcome of an operation that produces a payload (get, query, count)
#[derive(Debug, Clone, PartialEq)]
pub struct DataResult<T> {
    /// Classified status
    pub status: ResultStatus,

    /// Payload; present for `Success` and `NoContent`
    pub data: Option<T>,

    /// Failure detail, if any
    pub message: Option<String>,
}

impl<T> DataResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResultStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    /// Success without meaningful content; the (empty) payload is kept
    pub fn no_content(data: T) -> Self {
        Self {
            status: ResultStatus::NoContent,
            data: Some(data),
            message: None,
        }
    }

    /// Builds a failed result; the payload is always absent
    pub fn failure(status: ResultStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure(ResultStatus::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::failure(ResultStatus::Conflict, message)
    }

    pub fn throttled(message: impl Into<String>) -> Self {
        Self::failure(ResultStatus::Throttled, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::failure(ResultStatus::InternalError, message)
    }

    /// Whether the operation succeeded
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Borrows the payload
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Takes the payload, discarding the status
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Maps the payload, keeping status and message
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DataResult<U> {
        DataResult {
            status: self.status,
            data: self.data.map(f),
            message: self.message,
        }
    }

    /// Drops the payload, keeping status and message
    pub fn without_data(self) -> StoreResult {
        StoreResult::from_status(self.status, self.message)
    }

    /// Converts into a `Result` so callers can use `?`
    pub fn into_result(self) -> Result<T> {
        match (self.status.is_success(), self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(failure_error(self.status, self.message)),
        }
    }
}

fn failure_error(status: ResultStatus, message: Option<String>) -> DocBridgeError {
    let message = message.unwrap_or_else(|| status.to_string());
    let err = match status {
        ResultStatus::NotFound => CosmosDbError::DocumentNotFound(message),
        ResultStatus::Conflict => CosmosDbError::Conflict(message),
        ResultStatus::Throttled => CosmosDbError::Throttled(message),
        ResultStatus::Success | ResultStatus::NoContent => CosmosDbError::NoContent(message),
        ResultStatus::InternalError => CosmosDbError::RequestFailed(message),
    };
    DocBridgeError::CosmosDb(err)
}

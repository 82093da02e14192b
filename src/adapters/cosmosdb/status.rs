//! SDK error classification
//!
//! Maps Cosmos DB failures onto [`ResultStatus`]:
//!
//! | service response | status |
//! |------------------|--------|
//! | 404 Not Found | `NotFound` |
//! | 409 Conflict, 412 Precondition Failed | `Conflict` |
//! | 429 Too Many Requests | `Throttled` |
//! | anything else | `InternalError` |

use crate::domain::{DataResult, ResultStatus, StoreResult};
use crate::log_operation_failure;
use azure_core::http::StatusCode;
use regex::Regex;
use std::sync::OnceLock;

/// Status names and codes as whole tokens, so ids such as `7c1f4290` never match
fn text_markers() -> &'static [(Regex, ResultStatus); 3] {
    static MARKERS: OnceLock<[(Regex, ResultStatus); 3]> = OnceLock::new();
    MARKERS.get_or_init(|| {
        let marker = |pattern: &str| Regex::new(pattern).expect("marker pattern is valid");
        [
            (
                marker(r"\b(429|TooManyRequests)\b|Request rate is large"),
                ResultStatus::Throttled,
            ),
            (marker(r"\b(404|NotFound)\b"), ResultStatus::NotFound),
            (
                marker(r"\b(409|412|Conflict|PreconditionFailed)\b"),
                ResultStatus::Conflict,
            ),
        ]
    })
}

/// Classifies an SDK error
///
/// Uses the HTTP status when the error carries one and falls back to the
/// rendered text otherwise.
pub fn classify_error(error: &azure_core::Error) -> ResultStatus {
    match error.http_status() {
        Some(status) => classify_status(status),
        None => classify_error_text(&error.to_string()),
    }
}

/// Classifies an HTTP status returned by the service
pub fn classify_status(status: StatusCode) -> ResultStatus {
    match status {
        StatusCode::NotFound => ResultStatus::NotFound,
        StatusCode::Conflict | StatusCode::PreconditionFailed => ResultStatus::Conflict,
        StatusCode::TooManyRequests => ResultStatus::Throttled,
        _ => ResultStatus::InternalError,
    }
}

/// Classifies an error from its rendered text
pub fn classify_error_text(text: &str) -> ResultStatus {
    text_markers()
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, status)| *status)
        .unwrap_or(ResultStatus::InternalError)
}

/// Logs a failure and wraps it as a [`StoreResult`]
pub fn store_failure(
    operation: &'static str,
    kind: &'static str,
    status: ResultStatus,
    message: String,
) -> StoreResult {
    log_operation_failure!(operation, kind, status, message);
    StoreResult::from_status(status, Some(message))
}

/// Logs a failure and wraps it as a [`DataResult`]
pub fn data_failure<T>(
    operation: &'static str,
    kind: &'static str,
    status: ResultStatus,
    message: String,
) -> DataResult<T> {
    log_operation_failure!(operation, kind, status, message);
    DataResult::failure(status, message)
}

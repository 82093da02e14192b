//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - JSON-formatted local log files with rotation
//! - Operation macros shared by the store implementations
//!
//! # Example
//!
//! ```no_run
//! use docbridge::logging::init_logging;
//! use docbridge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a store operation
///
/// # Example
///
/// ```no_run
/// use docbridge::log_operation;
///
/// log_operation!("get", "customer", "tenant-42/c-1");
/// ```
#[macro_export]
macro_rules! log_operation {
    ($operation:expr, $kind:expr, $target:expr) => {
        tracing::debug!(
            operation = $operation,
            kind = $kind,
            target = %$target,
            "Store operation started"
        );
    };
}

/// Log a failed store operation at a level matching its status
///
/// Expected outcomes (not found, conflict, throttled) log at `warn`;
/// internal errors log at `error`.
///
/// # Example
///
/// ```no_run
/// use docbridge::log_operation_failure;
/// use docbridge::domain::ResultStatus;
///
/// log_operation_failure!("get", "customer", ResultStatus::NotFound, "missing");
/// ```
#[macro_export]
macro_rules! log_operation_failure {
    ($operation:expr, $kind:expr, $status:expr, $message:expr) => {
        match $status {
            $crate::domain::ResultStatus::InternalError => tracing::error!(
                operation = $operation,
                kind = $kind,
                status = %$status,
                error = %$message,
                "Store operation failed"
            ),
            _ => tracing::warn!(
                operation = $operation,
                kind = $kind,
                status = %$status,
                error = %$message,
                "Store operation failed"
            ),
        }
    };
}

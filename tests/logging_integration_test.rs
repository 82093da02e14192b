//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so a
//! single test initializes it.

use docbridge::config::LoggingConfig;
use docbridge::domain::{DocumentKey, ResultStatus};
use docbridge::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "/var/log/docbridge");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_init_logging_writes_to_local_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).expect("Failed to initialize logging");

    let key = DocumentKey::parse("order-1", "tenant-1").unwrap();
    docbridge::log_operation!("get", "order", key);
    docbridge::log_operation_failure!("get", "order", ResultStatus::NotFound, "missing");
    drop(guard);

    assert!(log_path.is_dir());
    let entries: Vec<_> = std::fs::read_dir(&log_path)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert!(entries.iter().any(|name| name.starts_with("docbridge.log")));
}

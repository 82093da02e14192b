//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DocBridgeConfig;
use super::secret::secret_string;
use crate::domain::errors::DocBridgeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DocBridgeConfig
/// 4. Applies environment variable overrides (DOCBRIDGE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use docbridge::config::loader::load_config;
///
/// let config = load_config("docbridge.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DocBridgeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DocBridgeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DocBridgeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Parses, overrides and validates configuration from TOML text
pub fn load_config_from_str(contents: &str) -> Result<DocBridgeConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: DocBridgeConfig = toml::from_str(&contents)
        .map_err(|e| DocBridgeError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        DocBridgeError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. All missing variables are reported
/// in a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DocBridgeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using DOCBRIDGE_* prefix
///
/// Environment variables follow the pattern: DOCBRIDGE_<SECTION>_<KEY>
/// For example: DOCBRIDGE_COSMOSDB_ENDPOINT, DOCBRIDGE_LOGGING_LOCAL_PATH
///
/// # Errors
///
/// Returns a configuration error if a boolean or numeric override doesn't parse.
fn apply_env_overrides(config: &mut DocBridgeConfig) -> Result<()> {
    if let Ok(val) = std::env::var("DOCBRIDGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("DOCBRIDGE_COSMOSDB_ENDPOINT") {
        config.cosmosdb.endpoint = val;
    }
    if let Ok(val) = std::env::var("DOCBRIDGE_COSMOSDB_KEY") {
        config.cosmosdb.key = secret_string(val);
    }
    if let Ok(val) = std::env::var("DOCBRIDGE_COSMOSDB_DATABASE_NAME") {
        config.cosmosdb.database_name = val;
    }
    if let Ok(val) = std::env::var("DOCBRIDGE_COSMOSDB_CREATE_IF_MISSING") {
        config.cosmosdb.create_if_missing =
            parse_override("DOCBRIDGE_COSMOSDB_CREATE_IF_MISSING", &val, "true or false")?;
    }
    if let Ok(val) = std::env::var("DOCBRIDGE_COSMOSDB_REQUEST_TIMEOUT_SECONDS") {
        config.cosmosdb.request_timeout_seconds = parse_override(
            "DOCBRIDGE_COSMOSDB_REQUEST_TIMEOUT_SECONDS",
            &val,
            "a whole number of seconds",
        )?;
    }

    if let Ok(val) = std::env::var("DOCBRIDGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled =
            parse_override("DOCBRIDGE_LOGGING_LOCAL_ENABLED", &val, "true or false")?;
    }
    if let Ok(val) = std::env::var("DOCBRIDGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("DOCBRIDGE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(var: &str, value: &str, expected: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        DocBridgeError::Configuration(format!(
            "Invalid {var} value '{value}': expected {expected}"
        ))
    })
}

//! Pure configuration logic

use crate::error::{CliError, CliResult};

/// Validate log level
pub fn validate_log_level(level: &str) -> CliResult<()> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        other => Err(CliError::ConfigError(format!(
            "Unknown log level: '{}'. Supported: trace, debug, info, warn, error",
            other
        ))),
    }
}

/// Filter directive for the log subscriber.
///
/// Precedence: `--verbose`, then `RUST_LOG`, then the configured level,
/// then `warn`.
pub fn log_filter(verbose: bool, rust_log: Option<&str>, configured: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .or(configured)
        .unwrap_or("warn")
        .to_string()
}

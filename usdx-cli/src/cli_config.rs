//! CLI configuration loader and defaults.
//!
//! ```toml
//! state_path = "~/.usdx/ledger.json"
//! log_level = "info"
//! default_account = "alice"
//!
//! [minter]
//! allow_zero_supply = false
//! max_symbol_len = 10
//! ```

use crate::error::{CliError, CliResult};
use crate::logic::normalize_path;
use lib_minter::MinterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the home directory holding CLI files
pub const USDX_DIR: &str = ".usdx";

/// Default CLI config filename under ~/.usdx/
pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

/// Default ledger state filename under ~/.usdx/
pub const DEFAULT_STATE_FILENAME: &str = "ledger.json";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    /// Ledger state file; `~/` is expanded
    pub state_path: Option<String>,
    /// Log filter used when neither `--verbose` nor `RUST_LOG` is set
    pub log_level: Option<String>,
    /// Account used when `--account` is absent
    pub default_account: Option<String>,
    /// Engine policy applied by `usdx init`
    #[serde(default)]
    pub minter: MinterConfig,
}

fn usdx_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(USDX_DIR))
        .unwrap_or_else(|| PathBuf::from(USDX_DIR))
}

pub fn default_config_path() -> PathBuf {
    usdx_dir().join(DEFAULT_CONFIG_FILENAME)
}

pub fn default_state_path() -> PathBuf {
    usdx_dir().join(DEFAULT_STATE_FILENAME)
}

/// Load the config at `path`, or the default location when `path` is `None`.
///
/// A missing default config yields defaults; a missing explicit one is an error.
pub fn load_config(path: Option<&str>) -> CliResult<CliConfig> {
    let config_path = match path {
        Some(path) => normalize_path(path)?,
        None => default_config_path(),
    };

    if !config_path.exists() {
        if path.is_some() {
            return Err(CliError::ConfigError(format!(
                "Configuration file not found: {}",
                config_path.display()
            )));
        }
        return Ok(CliConfig::default());
    }

    load_config_strict(&config_path)
}

pub fn load_config_strict(path: &Path) -> CliResult<CliConfig> {
    let raw = fs::read_to_string(path).map_err(|e| CliError::ConfigLoadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let config = parse_config(&raw).map_err(|e| CliError::ConfigLoadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!("Loaded CLI config from {}", path.display());
    Ok(config)
}

/// Parse and validate config text
pub fn parse_config(raw: &str) -> CliResult<CliConfig> {
    let config: CliConfig =
        toml::from_str(raw).map_err(|e| CliError::ConfigError(format!("Invalid CLI config: {}", e)))?;
    config
        .minter
        .validate()
        .map_err(|e| CliError::ConfigError(e.to_string()))?;
    if let Some(level) = &config.log_level {
        crate::logic::config::validate_log_level(level)?;
    }
    Ok(config)
}

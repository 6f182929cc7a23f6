//! Engine policy configuration
//!
//! Fixed at deployment and persisted with the engine state.

use serde::{Deserialize, Serialize};

use lib_tokens::DEFAULT_DECIMALS;

use crate::errors::{MinterError, MinterResult};

/// Largest supported decimals value
pub const MAX_DECIMALS: u8 = 18;

/// Policy knobs for token creation and genesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinterConfig {
    /// Decimals given to every token the engine creates
    pub default_decimals: u8,
    /// Whether `create_token` accepts an initial supply of zero
    pub allow_zero_supply: bool,
    /// Maximum token name length in characters
    pub max_name_len: usize,
    /// Maximum token symbol length in characters
    pub max_symbol_len: usize,
    /// Name of the stable unit created at genesis
    pub stable_name: String,
    /// Symbol of the stable unit created at genesis
    pub stable_symbol: String,
}

impl Default for MinterConfig {
    fn default() -> Self {
        Self {
            default_decimals: DEFAULT_DECIMALS,
            allow_zero_supply: false,
            max_name_len: 64,
            max_symbol_len: 10,
            stable_name: "USDx Token".to_string(),
            stable_symbol: "USDx".to_string(),
        }
    }
}

impl MinterConfig {
    pub fn validate(&self) -> MinterResult<()> {
        if self.default_decimals > MAX_DECIMALS {
            return Err(MinterError::InvalidConfig(format!(
                "default_decimals {} exceeds {}",
                self.default_decimals, MAX_DECIMALS
            )));
        }
        if self.max_name_len == 0 || self.max_symbol_len == 0 {
            return Err(MinterError::InvalidConfig(
                "name and symbol limits must be positive".to_string(),
            ));
        }
        self.validate_metadata(&self.stable_name, &self.stable_symbol)
    }

    /// Check a name/symbol pair against this policy.
    ///
    /// Duplicates across tokens are allowed; identity is by token id only.
    pub fn validate_metadata(&self, name: &str, symbol: &str) -> MinterResult<()> {
        if name.trim().is_empty() {
            return Err(MinterError::InvalidMetadata("Token name cannot be empty".to_string()));
        }
        if symbol.trim().is_empty() {
            return Err(MinterError::InvalidMetadata("Token symbol cannot be empty".to_string()));
        }
        if name.chars().count() > self.max_name_len {
            return Err(MinterError::InvalidMetadata(format!(
                "Token name too long (max {} characters)",
                self.max_name_len
            )));
        }
        if symbol.chars().count() > self.max_symbol_len {
            return Err(MinterError::InvalidMetadata(format!(
                "Token symbol too long (max {} characters)",
                self.max_symbol_len
            )));
        }
        Ok(())
    }
}

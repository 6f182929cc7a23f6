//! Structured error types for the USDx CLI

use lib_minter::MinterError;
use thiserror::Error;

/// USDx CLI error types with context
#[derive(Error, Debug)]
pub enum CliError {
    // Configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to load config from {path}: {reason}")]
    ConfigLoadFailed { path: String, reason: String },

    // Path operations
    #[error("Path error: {0}")]
    PathError(String),

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    // Ledger state file
    #[error("No ledger state at {0}; run `usdx init` first")]
    StateNotFound(String),

    #[error("Ledger state already exists at {0}; pass --force to replace it")]
    StateExists(String),

    // Argument resolution
    #[error("No account given: pass --account or set default_account in the config")]
    MissingAccount,

    #[error("Invalid account '{0}': expected 64 hex characters or a label of letters, digits, '-' or '_'")]
    InvalidAccount(String),

    #[error("Invalid amount '{input}' for a token with {decimals} decimals")]
    InvalidAmount { input: String, decimals: u8 },

    #[error("Unknown token '{0}'")]
    UnknownToken(String),

    #[error("Symbol '{symbol}' matches {count} tokens; use the token id")]
    AmbiguousToken { symbol: String, count: usize },

    // Ledger
    #[error("Ledger error: {0}")]
    Ledger(#[from] MinterError),

    // I/O operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // Serialization
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

impl From<String> for CliError {
    fn from(s: String) -> Self {
        CliError::Other(s)
    }
}

impl From<&str> for CliError {
    fn from(s: &str) -> Self {
        CliError::Other(s.to_string())
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use lib_tokens::TokenError;
    use lib_types::TokenId;

    #[test]
    fn test_invalid_amount_error() {
        let err = CliError::InvalidAmount {
            input: "1.2.3".to_string(),
            decimals: 18,
        };
        assert_eq!(
            err.to_string(),
            "Invalid amount '1.2.3' for a token with 18 decimals"
        );
    }

    #[test]
    fn test_ledger_error_keeps_leg_failure() {
        let err: CliError = MinterError::DepositFailed {
            token: TokenId::new([0xab; 32]),
            source: TokenError::InsufficientAllowance { have: 0, need: 50 },
        }
        .into();
        let text = err.to_string();
        assert!(text.starts_with("Ledger error: Deposit of"));
        assert!(text.contains("need 50"));
    }
}

//! Minter/Exchange Engine Errors

use lib_tokens::TokenError;
use lib_types::{Amount, TokenId};
use thiserror::Error;

/// Error during engine or ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MinterError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Stable unit already bound to {0}")]
    AlreadyBound(TokenId),

    #[error("Stable unit is not bound")]
    StableUnitUnbound,

    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),

    #[error("Token {0} cannot serve as the stable unit")]
    InvalidStableUnit(TokenId),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Initial supply must be greater than zero")]
    InvalidSupply,

    #[error("Invalid token metadata: {0}")]
    InvalidMetadata(String),

    #[error("Insufficient engine reserve of {token}: have {have}, need {need}")]
    InsufficientEngineReserve {
        token: TokenId,
        have: Amount,
        need: Amount,
    },

    #[error("Deposit of {token} failed: {source}")]
    DepositFailed { token: TokenId, source: TokenError },

    #[error("Redeem of {token} failed: {source}")]
    RedeemFailed { token: TokenId, source: TokenError },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Invariant violated: {0}")]
    InvariantViolated(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl MinterError {
    /// The token-level failure behind this error, if any
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            MinterError::DepositFailed { source, .. }
            | MinterError::RedeemFailed { source, .. }
            | MinterError::Token(source) => Some(source),
            _ => None,
        }
    }
}

/// Result type for engine operations
pub type MinterResult<T> = Result<T, MinterError>;

//! Token Account Errors

use lib_types::Amount;
use thiserror::Error;

/// Error during token operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Conservation invariant violated: {0}")]
    ConservationViolated(String),
}

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;

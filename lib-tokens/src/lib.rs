//! USDx Token Accounts
//!
//! This crate defines the fungible token ledger used for both the stable
//! unit and every dynamically created token.
//!
//! # Key Types
//!
//! - [`TokenAccount`]: balances, allowances and mint/burn authority
//! - [`ExecutionContext`]: who is acting, derived from the call, never from arguments
//! - [`TokenError`]: failure taxonomy for token operations
//!
//! Cross-token orchestration (deposit/redeem) lives in `lib-minter`.

pub mod account;
pub mod context;
pub mod errors;

pub use account::{TokenAccount, TokenInfo, DEFAULT_DECIMALS};
pub use context::{CallOrigin, ExecutionContext};
pub use errors::{TokenError, TokenResult};

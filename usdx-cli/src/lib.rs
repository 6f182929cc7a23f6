//! USDx CLI Library
//!
//! Drives a locally persisted USDx ledger: deploy it, create tokens, approve
//! the engine, deposit and redeem, and inspect balances and events.
//!
//! ## Architecture
//!
//! - **Functional Core** (`logic/` module): account, token and amount parsing
//! - **Imperative Shell** (`commands/` module): state loading, ledger calls, output
//! - **Error Handling** (`error` module): structured CLI error types
//! - **Output Abstraction** (`output` module): testable printing interface

pub mod argument_parsing;
pub mod cli_config;
pub mod commands;
pub mod error;
pub mod logic;
pub mod output;

pub use argument_parsing::{execute, run_cli, OutputFormat, UsdxCli, UsdxCommand};
pub use error::{CliError, CliResult};
pub use output::Output;

/// USDx CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Amount argument parsing and display
//!
//! Amounts are typed in whole-token units (`"12.5"`) and scaled by the
//! token's decimals before they reach the ledger.

use crate::error::{CliError, CliResult};
use lib_types::{format_units, parse_units, Amount};

pub fn parse_amount(input: &str, decimals: u8) -> CliResult<Amount> {
    parse_units(input, decimals).ok_or_else(|| CliError::InvalidAmount {
        input: input.to_string(),
        decimals,
    })
}

/// `"12.5 GLD"`
pub fn display_amount(amount: Amount, decimals: u8, symbol: &str) -> String {
    format!("{} {}", format_units(amount, decimals), symbol)
}

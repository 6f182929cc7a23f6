//! Token argument resolution
//!
//! A token is named by its hex id, by symbol when the symbol is unique, or
//! by `usdx` for the bound stable unit.

use crate::error::{CliError, CliResult};
use lib_minter::Ledger;
use lib_types::TokenId;

/// Resolves to the bound stable unit regardless of its configured symbol
pub const STABLE_KEYWORD: &str = "usdx";

pub fn resolve_token(input: &str, ledger: &Ledger) -> CliResult<TokenId> {
    let input = input.trim();

    if input.eq_ignore_ascii_case(STABLE_KEYWORD) {
        return ledger
            .usdx_token()
            .ok_or_else(|| CliError::UnknownToken(input.to_string()));
    }

    if let Ok(id) = input.parse::<TokenId>() {
        return match ledger.token(&id) {
            Ok(_) => Ok(id),
            Err(_) => Err(CliError::UnknownToken(input.to_string())),
        };
    }

    let stable = ledger.usdx_token();
    let matches: Vec<TokenId> = stable
        .iter()
        .chain(ledger.all_tokens().iter())
        .copied()
        .filter(|id| {
            ledger
                .token(id)
                .map(|token| token.symbol().eq_ignore_ascii_case(input))
                .unwrap_or(false)
        })
        .collect();

    match matches.as_slice() {
        [] => Err(CliError::UnknownToken(input.to_string())),
        [id] => Ok(*id),
        _ => Err(CliError::AmbiguousToken {
            symbol: input.to_string(),
            count: matches.len(),
        }),
    }
}

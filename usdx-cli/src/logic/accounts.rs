//! Account argument parsing
//!
//! An account is given either as a 32-byte hex address or as a short label.
//! Labels map deterministically to addresses, so `alice` is the same holder
//! across invocations without anyone typing 64 hex characters.

use crate::error::{CliError, CliResult};
use lib_types::Address;

/// Resolves to the engine's own address, e.g. as an approval spender
pub const ENGINE_KEYWORD: &str = "engine";

const ACCOUNT_LABEL_DOMAIN: &[u8] = b"USDX_ACCOUNT_LABEL_V1";
const MAX_LABEL_LEN: usize = 32;

/// Address a label stands for
pub fn label_address(label: &str) -> Address {
    Address::derive(ACCOUNT_LABEL_DOMAIN, &[label.to_lowercase().as_bytes()])
}

fn is_hex_address(input: &str) -> bool {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    digits.len() == 64 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_valid_label(input: &str) -> bool {
    !input.is_empty()
        && input.len() <= MAX_LABEL_LEN
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resolve an account argument. `engine` names the exchange engine.
pub fn parse_account(input: &str, engine: Address) -> CliResult<Address> {
    let input = input.trim();
    if input.eq_ignore_ascii_case(ENGINE_KEYWORD) {
        return Ok(engine);
    }
    if is_hex_address(input) {
        return input
            .parse()
            .map_err(|_| CliError::InvalidAccount(input.to_string()));
    }
    if input.starts_with("0x") || !is_valid_label(input) {
        return Err(CliError::InvalidAccount(input.to_string()));
    }
    Ok(label_address(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGINE: Address = Address::new([0xee; 32]);

    #[test]
    fn test_hex_address() {
        let hex = "ab".repeat(32);
        assert_eq!(parse_account(&hex, ENGINE).unwrap(), Address::new([0xab; 32]));
        assert_eq!(
            parse_account(&format!("0x{}", hex), ENGINE).unwrap(),
            Address::new([0xab; 32])
        );
    }

    #[test]
    fn test_labels_are_stable_and_case_insensitive() {
        let alice = parse_account("alice", ENGINE).unwrap();
        assert_eq!(alice, label_address("Alice"));
        assert_ne!(alice, parse_account("bob", ENGINE).unwrap());
    }

    #[test]
    fn test_engine_keyword() {
        assert_eq!(parse_account("engine", ENGINE).unwrap(), ENGINE);
        assert_eq!(parse_account("ENGINE", ENGINE).unwrap(), ENGINE);
    }

    #[test]
    fn test_rejects_malformed_accounts() {
        let too_long = "a".repeat(33);
        for bad in ["", "0x1234", "has space", "semi;colon", too_long.as_str()] {
            assert!(
                matches!(parse_account(bad, ENGINE), Err(CliError::InvalidAccount(_))),
                "accepted {:?}",
                bad
            );
        }
    }
}

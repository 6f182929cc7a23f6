//! Identity derivation for the engine and the tokens it manages.
//!
//! # Domain Separation
//! Each identity kind hashes under its own versioned domain string so ids of
//! different kinds can never collide.
//!
//! # Input Encoding
//! Deterministic byte order, variable-length fields terminated by `0x00`:
//! 1. Domain tag
//! 2. Creator address (engine or deployer), 32 bytes
//! 3. Sequence number, u64 little-endian
//! 4. Name bytes, `0x00`
//! 5. Symbol bytes, `0x00`
//!
//! The sequence number makes every creation unique even when name and symbol
//! repeat.

use lib_types::{Address, TokenId};

const ENGINE_DOMAIN: &[u8] = b"USDX_ENGINE_V1";
const TOKEN_DOMAIN: &[u8] = b"USDX_TOKEN_ID_V1";
const GENESIS_DOMAIN: &[u8] = b"USDX_GENESIS_TOKEN_V1";

/// Address of the exchange engine deployed by `owner`
pub fn derive_engine_address(owner: &Address) -> Address {
    Address::derive(ENGINE_DOMAIN, &[owner.as_bytes()])
}

/// Id of the `nonce`-th token created by `engine`
pub fn derive_custom_token_id(engine: &Address, nonce: u64, name: &str, symbol: &str) -> TokenId {
    derive(TOKEN_DOMAIN, engine, nonce, name, symbol)
}

/// Id of a token deployed outside the engine (the stable unit)
pub fn derive_genesis_token_id(deployer: &Address, sequence: u64, name: &str, symbol: &str) -> TokenId {
    derive(GENESIS_DOMAIN, deployer, sequence, name, symbol)
}

fn derive(domain: &[u8], creator: &Address, sequence: u64, name: &str, symbol: &str) -> TokenId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(domain);
    hasher.update(creator.as_bytes());
    hasher.update(&sequence.to_le_bytes());
    hasher.update(name.as_bytes());
    hasher.update(&[0u8]);
    hasher.update(symbol.as_bytes());
    hasher.update(&[0u8]);
    TokenId::new(*hasher.finalize().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let engine = Address::new([1u8; 32]);
        assert_eq!(
            derive_custom_token_id(&engine, 0, "Gold", "GLD"),
            derive_custom_token_id(&engine, 0, "Gold", "GLD")
        );
    }

    #[test]
    fn test_nonce_separates_same_metadata() {
        let engine = Address::new([1u8; 32]);
        assert_ne!(
            derive_custom_token_id(&engine, 0, "Gold", "GLD"),
            derive_custom_token_id(&engine, 1, "Gold", "GLD")
        );
    }

    #[test]
    fn test_field_boundaries_are_unambiguous() {
        let engine = Address::new([1u8; 32]);
        assert_ne!(
            derive_custom_token_id(&engine, 0, "AB", "C"),
            derive_custom_token_id(&engine, 0, "A", "BC")
        );
    }

    #[test]
    fn test_domains_do_not_collide() {
        let creator = Address::new([2u8; 32]);
        assert_ne!(
            derive_custom_token_id(&creator, 0, "USDx Token", "USDx"),
            derive_genesis_token_id(&creator, 0, "USDx Token", "USDx")
        );
        assert_ne!(derive_engine_address(&creator), creator);
    }
}

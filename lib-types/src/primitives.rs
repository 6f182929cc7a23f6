//! Canonical Primitive Types for the USDx Ledger
//!
//! Rule: identities are fixed-size byte arrays, never free-form strings.
//!
//! Both identifier types serialize as lowercase hex so they can be used as
//! map keys in human-readable formats (JSON state files, TOML config).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Token amounts in minimal units
pub type Amount = u128;

// ============================================================================
// PARSE ERRORS
// ============================================================================

/// Error produced when parsing an identifier from hex
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    /// Input was not valid hex
    InvalidHex(String),
    /// Input decoded to the wrong number of bytes
    InvalidLength(usize),
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseIdError::InvalidHex(reason) => write!(f, "Invalid hex: {}", reason),
            ParseIdError::InvalidLength(len) => {
                write!(f, "Invalid length: expected 32 bytes, got {}", len)
            }
        }
    }
}

impl std::error::Error for ParseIdError {}

fn decode_hex32(input: &str) -> Result<[u8; 32], ParseIdError> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(trimmed).map_err(|e| ParseIdError::InvalidHex(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(ParseIdError::InvalidLength(bytes.len()));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// 32-byte address of a holder or of the exchange engine
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Create a new Address from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a zeroed Address
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Derive an address from a domain tag and arbitrary parts.
    ///
    /// blake3 over `domain || part_0 || part_1 || ...`; deterministic across runs.
    pub fn derive(domain: &[u8], parts: &[&[u8]]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(domain);
        for part in parts {
            hasher.update(part);
        }
        Self(*hasher.finalize().as_bytes())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex32(s).map(Self)
    }
}

impl TryFrom<String> for Address {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// 32-byte token identifier
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId(pub [u8; 32]);

impl TokenId {
    /// Create a new TokenId from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short form used in logs and tables
    pub fn short(&self) -> String {
        let full = hex::encode(self.0);
        format!("{}..{}", &full[..6], &full[full.len() - 4..])
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for TokenId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for TokenId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for TokenId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex32(s).map(Self)
    }
}

impl TryFrom<String> for TokenId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenId> for String {
    fn from(value: TokenId) -> Self {
        value.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

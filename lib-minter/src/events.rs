//! Ledger Event Records
//!
//! Every committed state change appends one record. Clients read the log to
//! learn, for instance, the id returned by a token creation. Failed calls
//! never append.

use serde::{Deserialize, Serialize};

use lib_types::{Address, Amount, TokenId};

// ============================================================================
// EVENT TYPES
// ============================================================================

/// State changes observable by clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A token was deployed outside the engine (the stable unit)
    GenesisTokenCreated {
        token: TokenId,
        name: String,
        symbol: String,
        owner: Address,
    },

    /// The engine created and registered a token
    TokenCreated {
        token: TokenId,
        name: String,
        symbol: String,
        decimals: u8,
        #[serde(with = "amount_string")]
        initial_supply: Amount,
        recipient: Address,
        creator: Address,
    },

    /// The engine's stable unit was bound
    StableUnitBound { token: TokenId },

    /// Mint/burn authority changed hands
    OwnershipTransferred {
        token: TokenId,
        previous_owner: Address,
        new_owner: Address,
    },

    /// Allowance set
    Approval {
        token: TokenId,
        owner: Address,
        spender: Address,
        #[serde(with = "amount_string")]
        amount: Amount,
    },

    /// Direct holder-to-holder transfer
    Transfer {
        token: TokenId,
        from: Address,
        to: Address,
        #[serde(with = "amount_string")]
        amount: Amount,
    },

    /// Custom token exchanged into the stable unit
    Deposited {
        token: TokenId,
        account: Address,
        #[serde(with = "amount_string")]
        amount: Amount,
    },

    /// Stable unit exchanged back into a custom token
    Redeemed {
        token: TokenId,
        account: Address,
        #[serde(with = "amount_string")]
        amount: Amount,
    },
}

/// Amounts as decimal strings of minimal units
mod amount_string {
    use lib_types::Amount;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Amount>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerEvent::GenesisTokenCreated { token, symbol, .. } => {
                write!(f, "GenesisTokenCreated({} {})", symbol, token.short())
            }
            LedgerEvent::TokenCreated { token, symbol, initial_supply, .. } => {
                write!(f, "TokenCreated({} {} supply={})", symbol, token.short(), initial_supply)
            }
            LedgerEvent::StableUnitBound { token } => write!(f, "StableUnitBound({})", token.short()),
            LedgerEvent::OwnershipTransferred { token, .. } => {
                write!(f, "OwnershipTransferred({})", token.short())
            }
            LedgerEvent::Approval { token, amount, .. } => {
                write!(f, "Approval({} amount={})", token.short(), amount)
            }
            LedgerEvent::Transfer { token, amount, .. } => {
                write!(f, "Transfer({} amount={})", token.short(), amount)
            }
            LedgerEvent::Deposited { token, amount, .. } => {
                write!(f, "Deposited({} amount={})", token.short(), amount)
            }
            LedgerEvent::Redeemed { token, amount, .. } => {
                write!(f, "Redeemed({} amount={})", token.short(), amount)
            }
        }
    }
}

// ============================================================================
// EVENT LOG
// ============================================================================

/// Event with its position in the log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedEvent {
    pub sequence: u64,
    pub event: LedgerEvent,
}

/// Append-only event log
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EventLog {
    records: Vec<RecordedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its sequence number
    pub fn record(&mut self, event: LedgerEvent) -> u64 {
        let sequence = self.records.len() as u64;
        tracing::debug!("Event #{}: {}", sequence, event);
        self.records.push(RecordedEvent { sequence, event });
        sequence
    }

    pub fn all(&self) -> &[RecordedEvent] {
        &self.records
    }

    /// Records with `sequence >= from`
    pub fn since(&self, from: u64) -> &[RecordedEvent] {
        let start = (from as usize).min(self.records.len());
        &self.records[start..]
    }

    pub fn last(&self) -> Option<&RecordedEvent> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers() {
        let mut log = EventLog::new();
        let token = TokenId::new([1u8; 32]);

        assert_eq!(log.record(LedgerEvent::StableUnitBound { token }), 0);
        assert_eq!(
            log.record(LedgerEvent::Deposited {
                token,
                account: Address::new([2u8; 32]),
                amount: 5,
            }),
            1
        );

        assert_eq!(log.len(), 2);
        assert_eq!(log.since(1).len(), 1);
        assert!(log.since(10).is_empty());
        assert_eq!(log.last().unwrap().sequence, 1);
    }

    #[test]
    fn test_display() {
        let event = LedgerEvent::Redeemed {
            token: TokenId::new([0xab; 32]),
            account: Address::zero(),
            amount: 7,
        };
        assert_eq!(event.to_string(), "Redeemed(ababab..abab amount=7)");
    }

    #[test]
    fn test_json_roundtrip_keeps_large_amounts() {
        let event = LedgerEvent::Deposited {
            token: TokenId::new([1u8; 32]),
            account: Address::new([2u8; 32]),
            amount: u128::MAX,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.starts_with(r#"{"Deposited""#));
        assert!(json.contains(&format!("\"amount\":\"{}\"", u128::MAX)));
        let back: LedgerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_rejects_numeric_amount() {
        let json = format!(
            r#"{{"Redeemed":{{"token":"{}","account":"{}","amount":7}}}}"#,
            TokenId::new([1u8; 32]),
            Address::new([2u8; 32])
        );
        assert!(serde_json::from_str::<LedgerEvent>(&json).is_err());
    }
}

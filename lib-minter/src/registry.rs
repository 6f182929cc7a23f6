//! Append-only registry of engine-created tokens
//!
//! Holds identifiers only; the accounts themselves live in the
//! [`TokenArena`](crate::arena::TokenArena).

use serde::{Deserialize, Serialize};

use lib_types::TokenId;

/// Ordered list of every token the engine has created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenRegistry {
    tokens: Vec<TokenId>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly created token.
    ///
    /// No duplicate check: the engine is the only caller and derives a unique
    /// id per creation.
    pub fn register(&mut self, token_id: TokenId) {
        self.tokens.push(token_id);
    }

    /// Every registered token in creation order
    pub fn list_all(&self) -> &[TokenId] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Linear scan; guards stable binding and exchanges
    pub fn contains(&self, token_id: &TokenId) -> bool {
        self.tokens.contains(token_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let mut registry = TokenRegistry::new();
        let ids: Vec<TokenId> = (1..=3u8).map(|i| TokenId::new([i; 32])).collect();
        for id in &ids {
            registry.register(*id);
        }

        assert_eq!(registry.list_all(), ids.as_slice());
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(&ids[1]));
        assert!(!registry.contains(&TokenId::new([9u8; 32])));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut registry = TokenRegistry::new();
        registry.register(TokenId::new([1u8; 32]));

        let json = serde_json::to_string(&registry).unwrap();
        assert!(json.starts_with('['));
        let back: TokenRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, registry);
    }
}

//! Arena of token accounts
//!
//! Every TokenAccount (stable unit and custom tokens alike) is stored here
//! and addressed by its [`TokenId`] with O(1) lookup. Nothing else owns an
//! account; the engine and registry refer to them by id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use lib_tokens::TokenAccount;
use lib_types::TokenId;

use crate::errors::{MinterError, MinterResult};

/// Id-indexed store of token accounts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<TokenAccount>", into = "Vec<TokenAccount>")]
pub struct TokenArena {
    accounts: Vec<TokenAccount>,
    index: HashMap<TokenId, usize>,
}

impl TokenArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new account; ids are never reused
    pub fn insert(&mut self, account: TokenAccount) -> MinterResult<()> {
        let id = account.token_id();
        if self.index.contains_key(&id) {
            return Err(MinterError::InvalidToken(format!("token {} already exists", id)));
        }
        self.index.insert(id, self.accounts.len());
        self.accounts.push(account);
        Ok(())
    }

    pub fn get(&self, id: &TokenId) -> Option<&TokenAccount> {
        self.index.get(id).map(|&slot| &self.accounts[slot])
    }

    pub fn get_mut(&mut self, id: &TokenId) -> Option<&mut TokenAccount> {
        match self.index.get(id) {
            Some(&slot) => Some(&mut self.accounts[slot]),
            None => None,
        }
    }

    /// Like [`get`](Self::get) but fails with `TokenNotFound`
    pub fn require(&self, id: &TokenId) -> MinterResult<&TokenAccount> {
        self.get(id).ok_or(MinterError::TokenNotFound(*id))
    }

    pub fn require_mut(&mut self, id: &TokenId) -> MinterResult<&mut TokenAccount> {
        self.get_mut(id).ok_or(MinterError::TokenNotFound(*id))
    }

    pub fn contains(&self, id: &TokenId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenAccount> {
        self.accounts.iter()
    }

    /// Write back working copies of existing accounts.
    ///
    /// All slots are resolved before anything is written, so either every
    /// copy lands or none does.
    pub fn commit(&mut self, working: Vec<TokenAccount>) -> MinterResult<()> {
        let mut slots = Vec::with_capacity(working.len());
        for account in &working {
            let id = account.token_id();
            let slot = *self.index.get(&id).ok_or(MinterError::TokenNotFound(id))?;
            slots.push(slot);
        }
        for (slot, account) in slots.into_iter().zip(working) {
            self.accounts[slot] = account;
        }
        Ok(())
    }
}

impl From<Vec<TokenAccount>> for TokenArena {
    fn from(accounts: Vec<TokenAccount>) -> Self {
        let index = accounts
            .iter()
            .enumerate()
            .map(|(slot, account)| (account.token_id(), slot))
            .collect();
        Self { accounts, index }
    }
}

impl From<TokenArena> for Vec<TokenAccount> {
    fn from(arena: TokenArena) -> Self {
        arena.accounts
    }
}

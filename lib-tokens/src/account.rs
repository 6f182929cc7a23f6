//! TokenAccount
//!
//! A single fungible-token ledger: balances, allowances and the mint/burn
//! authority. Every operation validates first and writes last, so a failed
//! call leaves the account untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use lib_types::{Address, Amount, TokenId};

use crate::context::ExecutionContext;
use crate::errors::{TokenError, TokenResult};

/// Default number of decimal places for new tokens
pub const DEFAULT_DECIMALS: u8 = 18;

/// Fungible token ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    /// Unique token identifier
    token_id: TokenId,
    /// Human-readable token name
    name: String,
    /// Token symbol (e.g., "USDx")
    symbol: String,
    /// Number of decimal places (display only)
    decimals: u8,
    /// Current total supply in circulation
    total_supply: Amount,
    /// Holder balances; zero balances are not stored
    balances: HashMap<Address, Amount>,
    /// owner -> spender -> remaining allowance
    allowances: HashMap<Address, HashMap<Address, Amount>>,
    /// Sole holder of mint/burn capability
    owner: Address,
}

impl TokenAccount {
    /// Create an empty token owned by `owner`
    pub fn new(
        token_id: TokenId,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        owner: Address,
    ) -> Self {
        Self {
            token_id,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply: 0,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            owner,
        }
    }

    pub fn token_id(&self) -> TokenId {
        self.token_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Current mint/burn authority
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Get remaining allowance granted by `owner` to `spender`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Number of accounts holding a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Mint new tokens to `to`
    ///
    /// # Errors
    /// - `Unauthorized`: acting principal is not the mint authority
    /// - `Overflow`: total supply would leave the representable range
    pub fn mint(&mut self, ctx: &ExecutionContext, to: &Address, amount: Amount) -> TokenResult<()> {
        self.require_authority(ctx, "mint")?;

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        // Bounded by total supply, so this cannot overflow once the supply check passed.
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.set_balance(to, new_balance);
        self.total_supply = new_supply;
        Ok(())
    }

    /// Burn tokens held by `from`
    ///
    /// # Errors
    /// - `Unauthorized`: acting principal is not the burn authority
    /// - `InsufficientBalance`: `amount > balance(from)`
    pub fn burn(&mut self, ctx: &ExecutionContext, from: &Address, amount: Amount) -> TokenResult<()> {
        self.require_authority(ctx, "burn")?;

        let balance = self.balance_of(from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: balance,
                need: amount,
            });
        }
        let new_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or_else(|| TokenError::ConservationViolated("burn below zero supply".to_string()))?;

        self.set_balance(from, balance - amount);
        self.total_supply = new_supply;
        Ok(())
    }

    /// Transfer tokens from the acting principal to `to`
    ///
    /// - User calls: debit from ctx.caller
    /// - Contract calls: debit from ctx.contract
    pub fn transfer(&mut self, ctx: &ExecutionContext, to: &Address, amount: Amount) -> TokenResult<()> {
        let source = ctx.acting_principal()?;
        self.move_balance(&source, to, amount)
    }

    /// Set the allowance of `spender` over the acting principal's balance.
    ///
    /// Absolute set, not additive: re-submitting an approval is always safe.
    pub fn approve(&mut self, ctx: &ExecutionContext, spender: &Address, amount: Amount) -> TokenResult<()> {
        let owner = ctx.acting_principal()?;
        self.set_allowance(&owner, spender, amount);
        Ok(())
    }

    /// Spend an allowance: move `amount` from `owner` to `to` on behalf of
    /// the acting principal.
    ///
    /// # Errors
    /// - `InsufficientAllowance`: spender's allowance from owner is below `amount`
    /// - `InsufficientBalance`: owner holds less than `amount`
    pub fn transfer_from(
        &mut self,
        ctx: &ExecutionContext,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> TokenResult<()> {
        let spender = ctx.acting_principal()?;

        let allowance = self.allowance(owner, &spender);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                have: allowance,
                need: amount,
            });
        }

        self.move_balance(owner, to, amount)?;
        self.set_allowance(owner, &spender, allowance - amount);
        Ok(())
    }

    /// Hand mint/burn capability to `new_owner`; returns the previous owner.
    pub fn transfer_ownership(&mut self, ctx: &ExecutionContext, new_owner: &Address) -> TokenResult<Address> {
        self.require_authority(ctx, "transfer ownership")?;
        let previous = self.owner;
        self.owner = *new_owner;
        Ok(previous)
    }

    /// Recompute the sum of balances and compare it with total supply
    pub fn check_supply_invariant(&self) -> TokenResult<()> {
        let sum = self
            .balances
            .values()
            .try_fold(0 as Amount, |acc, b| acc.checked_add(*b))
            .ok_or(TokenError::Overflow)?;

        if sum != self.total_supply {
            return Err(TokenError::ConservationViolated(format!(
                "sum of balances ({}) != total supply ({}) for {}",
                sum, self.total_supply, self.token_id
            )));
        }
        Ok(())
    }

    /// Get token information as a summary
    pub fn info(&self) -> TokenInfo {
        TokenInfo {
            token_id: self.token_id,
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            total_supply: self.total_supply,
            owner: self.owner,
            holder_count: self.holder_count(),
        }
    }

    fn require_authority(&self, ctx: &ExecutionContext, action: &str) -> TokenResult<()> {
        let principal = ctx.acting_principal()?;
        if principal != self.owner {
            return Err(TokenError::Unauthorized(format!(
                "{} on {} requires the token authority",
                action, self.symbol
            )));
        }
        Ok(())
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: Amount) -> TokenResult<()> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        let new_from_balance = from_balance - amount;
        let to_balance = if from == to {
            new_from_balance
        } else {
            self.balance_of(to)
        };
        let new_to_balance = to_balance
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.set_balance(from, new_from_balance);
        self.set_balance(to, new_to_balance);
        Ok(())
    }

    fn set_balance(&mut self, account: &Address, amount: Amount) {
        if amount == 0 {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, amount);
        }
    }

    fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: Amount) {
        if amount == 0 {
            if let Some(spenders) = self.allowances.get_mut(owner) {
                spenders.remove(spender);
                if spenders.is_empty() {
                    self.allowances.remove(owner);
                }
            }
        } else {
            self.allowances
                .entry(*owner)
                .or_default()
                .insert(*spender, amount);
        }
    }
}

/// Token information structure for queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub token_id: TokenId,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Amount,
    pub owner: Address,
    pub holder_count: usize,
}

//! Ledger facade
//!
//! Single entry point for clients. Owns every token account, the exchange
//! engine and the event log. Each call takes the submitting account, runs to
//! completion and appends its event only after it committed.
//!
//! Callers are whatever the surrounding system authenticated; the facade only
//! builds user-origin contexts, so a client can never act as the engine.

use serde::{Deserialize, Serialize};

use lib_tokens::{ExecutionContext, TokenAccount, TokenInfo};
use lib_types::{Address, Amount, TokenId};

use crate::arena::TokenArena;
use crate::config::MinterConfig;
use crate::engine::{ExchangeReceipt, ExchangeTotals, MinterEngine, StableUnitState};
use crate::errors::{MinterError, MinterResult};
use crate::events::{EventLog, LedgerEvent, RecordedEvent};
use crate::token_id::derive_genesis_token_id;

/// One row of an account's balance table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub token: TokenId,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub balance: Amount,
    /// True for the engine's stable unit
    pub stable: bool,
}

/// Complete ledger state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    tokens: TokenArena,
    engine: MinterEngine,
    events: EventLog,
}

impl Ledger {
    /// Empty ledger with an engine administered by `owner`
    pub fn new(owner: Address, config: MinterConfig) -> MinterResult<Self> {
        let engine = MinterEngine::new(owner, config)?;
        tracing::info!(
            "Ledger: engine {} deployed by {}",
            engine.contract_address(),
            owner
        );
        Ok(Self {
            tokens: TokenArena::new(),
            engine,
            events: EventLog::new(),
        })
    }

    fn user_context(&self, caller: Address) -> MinterResult<ExecutionContext> {
        if caller == self.engine.contract_address() {
            return Err(MinterError::Unauthorized(
                "the engine address cannot submit calls".to_string(),
            ));
        }
        Ok(ExecutionContext::user(caller))
    }

    // ------------------------------------------------------------------
    // Token calls
    // ------------------------------------------------------------------

    /// Deploy a standalone token owned by `caller`, outside the registry.
    /// This is how the stable unit comes into existence.
    pub fn genesis_token(
        &mut self,
        caller: Address,
        name: &str,
        symbol: &str,
        decimals: u8,
    ) -> MinterResult<TokenId> {
        self.user_context(caller)?;
        self.engine.config().validate_metadata(name, symbol)?;
        if decimals > crate::config::MAX_DECIMALS {
            return Err(MinterError::InvalidMetadata(format!(
                "decimals {} exceeds {}",
                decimals,
                crate::config::MAX_DECIMALS
            )));
        }

        let token = derive_genesis_token_id(&caller, self.tokens.len() as u64, name, symbol);
        self.tokens
            .insert(TokenAccount::new(token, name, symbol, decimals, caller))?;

        self.events.record(LedgerEvent::GenesisTokenCreated {
            token,
            name: name.to_string(),
            symbol: symbol.to_string(),
            owner: caller,
        });
        tracing::info!("Ledger: genesis token {} ({}) owned by {}", symbol, token, caller);
        Ok(token)
    }

    /// Set `spender`'s allowance over the caller's balance of `token`
    pub fn approve(
        &mut self,
        caller: Address,
        token: TokenId,
        spender: Address,
        amount: Amount,
    ) -> MinterResult<()> {
        let ctx = self.user_context(caller)?;
        self.tokens.require_mut(&token)?.approve(&ctx, &spender, amount)?;

        self.events.record(LedgerEvent::Approval {
            token,
            owner: caller,
            spender,
            amount,
        });
        Ok(())
    }

    /// Move `amount` of `token` from the caller to `to`
    pub fn transfer(&mut self, caller: Address, token: TokenId, to: Address, amount: Amount) -> MinterResult<()> {
        let ctx = self.user_context(caller)?;
        self.tokens.require_mut(&token)?.transfer(&ctx, &to, amount)?;

        self.events.record(LedgerEvent::Transfer {
            token,
            from: caller,
            to,
            amount,
        });
        Ok(())
    }

    /// Hand mint/burn authority over `token` to `new_owner`
    pub fn transfer_ownership(&mut self, caller: Address, token: TokenId, new_owner: Address) -> MinterResult<()> {
        let ctx = self.user_context(caller)?;
        let previous_owner = self
            .tokens
            .require_mut(&token)?
            .transfer_ownership(&ctx, &new_owner)?;

        self.events.record(LedgerEvent::OwnershipTransferred {
            token,
            previous_owner,
            new_owner,
        });
        tracing::info!("Ledger: authority over {} moved to {}", token, new_owner);
        Ok(())
    }

    pub fn balance_of(&self, token: &TokenId, account: &Address) -> MinterResult<Amount> {
        Ok(self.tokens.require(token)?.balance_of(account))
    }

    pub fn allowance(&self, token: &TokenId, owner: &Address, spender: &Address) -> MinterResult<Amount> {
        Ok(self.tokens.require(token)?.allowance(owner, spender))
    }

    pub fn token(&self, token: &TokenId) -> MinterResult<&TokenAccount> {
        self.tokens.require(token)
    }

    pub fn token_info(&self, token: &TokenId) -> MinterResult<TokenInfo> {
        Ok(self.tokens.require(token)?.info())
    }

    // ------------------------------------------------------------------
    // Engine calls
    // ------------------------------------------------------------------

    /// Create and register a custom token; the new id is also recorded in
    /// the `TokenCreated` event.
    pub fn create_token(
        &mut self,
        caller: Address,
        name: &str,
        symbol: &str,
        initial_supply: Amount,
        recipient: Address,
    ) -> MinterResult<TokenId> {
        self.user_context(caller)?;
        let token = self
            .engine
            .create_token(&mut self.tokens, caller, name, symbol, initial_supply, recipient)?;

        self.events.record(LedgerEvent::TokenCreated {
            token,
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals: self.engine.config().default_decimals,
            initial_supply,
            recipient,
            creator: caller,
        });
        Ok(token)
    }

    /// Bind the engine's stable unit; succeeds once
    pub fn set_usdx_token(&mut self, caller: Address, token: TokenId) -> MinterResult<()> {
        self.user_context(caller)?;
        self.engine.set_stable_unit(&self.tokens, caller, token)?;
        self.events.record(LedgerEvent::StableUnitBound { token });
        Ok(())
    }

    pub fn deposit_token(&mut self, caller: Address, token: TokenId, amount: Amount) -> MinterResult<ExchangeReceipt> {
        self.user_context(caller)?;
        let receipt = self
            .engine
            .deposit_token(&mut self.tokens, caller, token, amount)?;

        self.events.record(LedgerEvent::Deposited {
            token,
            account: caller,
            amount,
        });
        Ok(receipt)
    }

    pub fn redeem_token(&mut self, caller: Address, token: TokenId, amount: Amount) -> MinterResult<ExchangeReceipt> {
        self.user_context(caller)?;
        let receipt = self
            .engine
            .redeem_token(&mut self.tokens, caller, token, amount)?;

        self.events.record(LedgerEvent::Redeemed {
            token,
            account: caller,
            amount,
        });
        Ok(receipt)
    }

    pub fn all_tokens(&self) -> &[TokenId] {
        self.engine.all_tokens()
    }

    pub fn usdx_token(&self) -> Option<TokenId> {
        self.engine.usdx_token()
    }

    pub fn contract_address(&self) -> Address {
        self.engine.contract_address()
    }

    pub fn engine(&self) -> &MinterEngine {
        &self.engine
    }

    pub fn reserve_of(&self, token: &TokenId) -> Amount {
        self.engine.reserve_of(token)
    }

    pub fn exchange_totals(&self, token: &TokenId) -> ExchangeTotals {
        self.engine.exchange_totals(token)
    }

    pub fn stable_unit_state(&self) -> StableUnitState {
        self.engine.stable_unit_state(&self.tokens)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Balance of `account` in the stable unit followed by every registered
    /// token in creation order
    pub fn balances_for(&self, account: &Address) -> Vec<BalanceRow> {
        let stable = self.engine.usdx_token();
        stable
            .iter()
            .chain(self.engine.all_tokens().iter())
            .filter_map(|id| self.tokens.get(id))
            .map(|token| BalanceRow {
                token: token.token_id(),
                name: token.name().to_string(),
                symbol: token.symbol().to_string(),
                decimals: token.decimals(),
                balance: token.balance_of(account),
                stable: Some(token.token_id()) == stable,
            })
            .collect()
    }

    pub fn events(&self) -> &[RecordedEvent] {
        self.events.all()
    }

    pub fn events_since(&self, from: u64) -> &[RecordedEvent] {
        self.events.since(from)
    }

    /// Re-check every account's supply and the engine's reserve accounting
    pub fn verify_invariants(&self) -> MinterResult<()> {
        for account in self.tokens.iter() {
            account.check_supply_invariant()?;
        }
        self.engine.verify(&self.tokens)
    }
}

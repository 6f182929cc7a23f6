//! Minter/Exchange Engine
//!
//! Creates tokens, holds the stable unit's mint/burn authority, and runs
//! deposit (custom token → USDx) and redeem (USDx → custom token) as atomic
//! two-leg exchanges at a fixed 1:1 rate in minimal units.
//!
//! ## Invariants
//!
//! ### E1: One-time binding
//! The stable unit binding moves `Unbound → Bound` once and never changes.
//!
//! ### E2: Leg atomicity
//! Both legs of an exchange run against working copies of the two accounts.
//! The copies are committed together only when every leg succeeded.
//!
//! ### E3: Reserve conservation
//! For every token, `reserve == deposited - redeemed`, so cumulative redeemed
//! volume never exceeds cumulative deposited volume.
//!
//! The engine never owns token accounts: every operation borrows the
//! [`TokenArena`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use lib_tokens::{ExecutionContext, TokenAccount, TokenError};
use lib_types::{Address, Amount, TokenId};

use crate::arena::TokenArena;
use crate::config::MinterConfig;
use crate::errors::{MinterError, MinterResult};
use crate::registry::TokenRegistry;
use crate::token_id::{derive_custom_token_id, derive_engine_address};

/// Which token the engine treats as the stable unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StableBinding {
    Unbound,
    Bound(TokenId),
}

/// Observed lifecycle of the stable unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StableUnitState {
    /// No stable unit bound yet
    Unbound,
    /// Bound, but its mint authority has not been handed to the engine
    Bound,
    /// Bound and the engine holds exclusive mint/burn authority
    Active,
}

/// Cumulative exchange volume for one token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTotals {
    pub deposited: Amount,
    pub redeemed: Amount,
}

/// Outcome of a committed deposit or redeem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeReceipt {
    pub token: TokenId,
    pub account: Address,
    pub amount: Amount,
    /// Engine reserve of `token` after the exchange
    pub reserve_after: Amount,
    /// Stable unit total supply after the exchange
    pub stable_supply_after: Amount,
}

/// Exchange engine state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinterEngine {
    /// The engine's own address; approvals target it
    address: Address,
    /// Administrator allowed to bind the stable unit
    owner: Address,
    stable: StableBinding,
    registry: TokenRegistry,
    reserves: HashMap<TokenId, Amount>,
    totals: HashMap<TokenId, ExchangeTotals>,
    /// Number of tokens created so far; feeds id derivation
    nonce: u64,
    config: MinterConfig,
}

impl MinterEngine {
    /// Deploy an engine administered by `owner`
    pub fn new(owner: Address, config: MinterConfig) -> MinterResult<Self> {
        config.validate()?;
        Ok(Self {
            address: derive_engine_address(&owner),
            owner,
            stable: StableBinding::Unbound,
            registry: TokenRegistry::new(),
            reserves: HashMap::new(),
            totals: HashMap::new(),
            nonce: 0,
            config,
        })
    }

    /// The engine's own identifier (`getContractAddress`)
    pub fn contract_address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn config(&self) -> &MinterConfig {
        &self.config
    }

    pub fn stable_binding(&self) -> StableBinding {
        self.stable
    }

    /// Bound stable unit, if any (`usdxToken`)
    pub fn usdx_token(&self) -> Option<TokenId> {
        match self.stable {
            StableBinding::Bound(token) => Some(token),
            StableBinding::Unbound => None,
        }
    }

    /// Every created token in creation order (`getAllTokens`)
    pub fn all_tokens(&self) -> &[TokenId] {
        self.registry.list_all()
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Engine's reserve of `token`: deposited minus redeemed
    pub fn reserve_of(&self, token: &TokenId) -> Amount {
        self.reserves.get(token).copied().unwrap_or(0)
    }

    pub fn exchange_totals(&self, token: &TokenId) -> ExchangeTotals {
        self.totals.get(token).copied().unwrap_or_default()
    }

    /// Context for sub-calls the engine makes while serving `caller`
    fn sub_context(&self, caller: Address) -> ExecutionContext {
        ExecutionContext::with_contract(caller, self.address)
    }

    fn require_stable(&self) -> MinterResult<TokenId> {
        self.usdx_token().ok_or(MinterError::StableUnitUnbound)
    }

    /// Only engine-created tokens carry a reserve
    fn require_registered(&self, token: &TokenId) -> MinterResult<()> {
        if self.registry.contains(token) {
            Ok(())
        } else {
            Err(MinterError::InvalidToken(format!("{} was not created by this engine", token)))
        }
    }

    pub fn stable_unit_state(&self, arena: &TokenArena) -> StableUnitState {
        match self.stable {
            StableBinding::Unbound => StableUnitState::Unbound,
            StableBinding::Bound(token) => match arena.get(&token) {
                Some(account) if account.owner() == self.address => StableUnitState::Active,
                _ => StableUnitState::Bound,
            },
        }
    }

    /// Create a token with the configured default decimals, mint
    /// `initial_supply` to `recipient` and register it.
    ///
    /// # Errors
    /// - `InvalidMetadata`: name or symbol rejected by policy
    /// - `InvalidSupply`: zero supply while `allow_zero_supply` is off
    pub fn create_token(
        &mut self,
        arena: &mut TokenArena,
        caller: Address,
        name: &str,
        symbol: &str,
        initial_supply: Amount,
        recipient: Address,
    ) -> MinterResult<TokenId> {
        self.config.validate_metadata(name, symbol)?;
        if initial_supply == 0 && !self.config.allow_zero_supply {
            return Err(MinterError::InvalidSupply);
        }

        let next_nonce = self.nonce.checked_add(1).ok_or(MinterError::Overflow)?;
        let token_id = derive_custom_token_id(&self.address, self.nonce, name, symbol);
        if arena.contains(&token_id) {
            return Err(MinterError::InvalidToken(format!("token {} already exists", token_id)));
        }

        let mut account = TokenAccount::new(
            token_id,
            name,
            symbol,
            self.config.default_decimals,
            self.address,
        );
        account.mint(&self.sub_context(caller), &recipient, initial_supply)?;

        arena.insert(account)?;
        self.registry.register(token_id);
        self.nonce = next_nonce;

        tracing::info!(
            "Minter: created token {} ({}) supply {} for {}",
            symbol,
            token_id,
            initial_supply,
            recipient
        );
        Ok(token_id)
    }

    /// One-time binding of the stable unit (`setUsdxToken`)
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not the engine owner
    /// - `AlreadyBound`: a stable unit is already bound (binding unchanged)
    /// - `TokenNotFound` / `InvalidStableUnit`: token unknown or engine-created
    pub fn set_stable_unit(&mut self, arena: &TokenArena, caller: Address, token: TokenId) -> MinterResult<()> {
        if caller != self.owner {
            return Err(MinterError::Unauthorized(
                "only the engine owner can bind the stable unit".to_string(),
            ));
        }
        if let StableBinding::Bound(existing) = self.stable {
            tracing::warn!("Minter: rejected rebinding of stable unit {} to {}", existing, token);
            return Err(MinterError::AlreadyBound(existing));
        }
        arena.require(&token)?;
        if self.registry.contains(&token) {
            return Err(MinterError::InvalidStableUnit(token));
        }

        self.stable = StableBinding::Bound(token);
        tracing::info!("Minter: stable unit bound to {}", token);
        Ok(())
    }

    /// Exchange `amount` of `token` for the same amount of stable unit.
    ///
    /// Requires the caller to have approved the engine for at least `amount`
    /// on `token`.
    pub fn deposit_token(
        &mut self,
        arena: &mut TokenArena,
        caller: Address,
        token: TokenId,
        amount: Amount,
    ) -> MinterResult<ExchangeReceipt> {
        let stable_id = self.require_stable()?;
        if token == stable_id {
            return Err(MinterError::InvalidToken("cannot deposit the stable unit".to_string()));
        }

        let mut custom = arena.require(&token)?.clone();
        self.require_registered(&token)?;
        let mut stable = arena.require(&stable_id)?.clone();
        let engine_ctx = self.sub_context(caller);
        let leg_failed = |source: TokenError| MinterError::DepositFailed { token, source };

        // Leg 1: pull the custom token into the engine's reserve
        custom
            .transfer_from(&engine_ctx, &caller, &self.address, amount)
            .map_err(leg_failed)?;
        tracing::debug!("Minter: deposit leg 1 pulled {} of {} from {}", amount, token, caller);

        // Leg 2: mint the stable unit to the caller
        stable
            .mint(&engine_ctx, &caller, amount)
            .map_err(leg_failed)?;

        let reserve_after = self
            .reserve_of(&token)
            .checked_add(amount)
            .ok_or(MinterError::Overflow)?;
        let mut totals = self.exchange_totals(&token);
        totals.deposited = totals.deposited.checked_add(amount).ok_or(MinterError::Overflow)?;
        let stable_supply_after = stable.total_supply();

        arena.commit(vec![custom, stable])?;
        self.reserves.insert(token, reserve_after);
        self.totals.insert(token, totals);

        tracing::info!(
            "Minter: {} deposited {} of {} (reserve {})",
            caller,
            amount,
            token,
            reserve_after
        );
        Ok(ExchangeReceipt {
            token,
            account: caller,
            amount,
            reserve_after,
            stable_supply_after,
        })
    }

    /// Exchange `amount` of stable unit back for `token` from the engine's reserve.
    ///
    /// Requires the caller to have approved the engine for at least `amount`
    /// on the stable unit.
    pub fn redeem_token(
        &mut self,
        arena: &mut TokenArena,
        caller: Address,
        token: TokenId,
        amount: Amount,
    ) -> MinterResult<ExchangeReceipt> {
        let stable_id = self.require_stable()?;
        if token == stable_id {
            return Err(MinterError::InvalidToken("cannot redeem into the stable unit".to_string()));
        }

        let reserve = self.reserve_of(&token);
        if reserve < amount {
            tracing::warn!(
                "Minter: redeem of {} {} exceeds reserve {}",
                amount,
                token,
                reserve
            );
            return Err(MinterError::InsufficientEngineReserve {
                token,
                have: reserve,
                need: amount,
            });
        }

        let mut custom = arena.require(&token)?.clone();
        self.require_registered(&token)?;
        let mut stable = arena.require(&stable_id)?.clone();
        let engine_ctx = self.sub_context(caller);
        let leg_failed = |source: TokenError| MinterError::RedeemFailed { token, source };

        // Leg 1: pull the stable unit into the engine and burn it
        stable
            .transfer_from(&engine_ctx, &caller, &self.address, amount)
            .map_err(leg_failed)?;
        stable
            .burn(&engine_ctx, &self.address, amount)
            .map_err(leg_failed)?;
        tracing::debug!("Minter: redeem leg 1 burned {} stable from {}", amount, caller);

        // Leg 2: release the custom token from the engine's holdings
        custom
            .transfer(&engine_ctx, &caller, amount)
            .map_err(leg_failed)?;

        let reserve_after = reserve - amount;
        let mut totals = self.exchange_totals(&token);
        totals.redeemed = totals.redeemed.checked_add(amount).ok_or(MinterError::Overflow)?;
        let stable_supply_after = stable.total_supply();

        arena.commit(vec![custom, stable])?;
        self.reserves.insert(token, reserve_after);
        self.totals.insert(token, totals);

        tracing::info!(
            "Minter: {} redeemed {} of {} (reserve {})",
            caller,
            amount,
            token,
            reserve_after
        );
        Ok(ExchangeReceipt {
            token,
            account: caller,
            amount,
            reserve_after,
            stable_supply_after,
        })
    }

    /// Check reserve accounting against the arena
    pub fn verify(&self, arena: &TokenArena) -> MinterResult<()> {
        for token in self.registry.list_all() {
            let account = arena
                .get(token)
                .ok_or_else(|| MinterError::InvariantViolated(format!("registered token {} missing", token)))?;

            let reserve = self.reserve_of(token);
            let totals = self.exchange_totals(token);
            if totals.redeemed > totals.deposited || totals.deposited - totals.redeemed != reserve {
                return Err(MinterError::InvariantViolated(format!(
                    "reserve {} of {} does not match deposited {} - redeemed {}",
                    reserve, token, totals.deposited, totals.redeemed
                )));
            }
            let held = account.balance_of(&self.address);
            if held < reserve {
                return Err(MinterError::InvariantViolated(format!(
                    "engine holds {} of {} but reserve is {}",
                    held, token, reserve
                )));
            }
        }

        if let Some(stable) = self.usdx_token() {
            if self.registry.contains(&stable) {
                return Err(MinterError::InvariantViolated(format!(
                    "stable unit {} is a registry member",
                    stable
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYER: Address = Address::new([1u8; 32]);
    const ALICE: Address = Address::new([2u8; 32]);

    /// Engine with an active stable unit, the way deployment wires it
    fn active_engine() -> (MinterEngine, TokenArena, TokenId) {
        let mut arena = TokenArena::new();
        let mut engine = MinterEngine::new(DEPLOYER, MinterConfig::default()).unwrap();

        let stable_id = TokenId::new([0xee; 32]);
        let mut stable = TokenAccount::new(stable_id, "USDx Token", "USDx", 18, DEPLOYER);
        stable
            .transfer_ownership(&ExecutionContext::user(DEPLOYER), &engine.contract_address())
            .unwrap();
        arena.insert(stable).unwrap();
        engine.set_stable_unit(&arena, DEPLOYER, stable_id).unwrap();

        (engine, arena, stable_id)
    }

    fn approve(arena: &mut TokenArena, token: TokenId, owner: Address, spender: Address, amount: Amount) {
        arena
            .require_mut(&token)
            .unwrap()
            .approve(&ExecutionContext::user(owner), &spender, amount)
            .unwrap();
    }

    #[test]
    fn test_create_token_registers_and_mints() {
        let (mut engine, mut arena, _) = active_engine();

        let token = engine
            .create_token(&mut arena, ALICE, "Gold", "GLD", 1000, ALICE)
            .unwrap();

        let account = arena.require(&token).unwrap();
        assert_eq!(account.balance_of(&ALICE), 1000);
        assert_eq!(account.decimals(), 18);
        assert_eq!(account.owner(), engine.contract_address());
        assert_eq!(engine.all_tokens(), &[token]);
    }

    #[test]
    fn test_create_token_allows_duplicate_metadata() {
        let (mut engine, mut arena, _) = active_engine();

        let first = engine.create_token(&mut arena, ALICE, "Gold", "GLD", 1, ALICE).unwrap();
        let second = engine.create_token(&mut arena, ALICE, "Gold", "GLD", 1, ALICE).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_create_token_zero_supply_policy() {
        let (mut engine, mut arena, _) = active_engine();
        assert_eq!(
            engine.create_token(&mut arena, ALICE, "Gold", "GLD", 0, ALICE),
            Err(MinterError::InvalidSupply)
        );
        assert!(engine.all_tokens().is_empty());

        let config = MinterConfig {
            allow_zero_supply: true,
            ..MinterConfig::default()
        };
        let mut permissive = MinterEngine::new(DEPLOYER, config).unwrap();
        let token = permissive.create_token(&mut arena, ALICE, "Gold", "GLD", 0, ALICE).unwrap();
        assert_eq!(arena.require(&token).unwrap().total_supply(), 0);
    }

    #[test]
    fn test_set_stable_unit_rules() {
        let mut arena = TokenArena::new();
        let mut engine = MinterEngine::new(DEPLOYER, MinterConfig::default()).unwrap();
        let first = TokenId::new([0xe1; 32]);
        let second = TokenId::new([0xe2; 32]);
        arena.insert(TokenAccount::new(first, "A", "A", 18, DEPLOYER)).unwrap();
        arena.insert(TokenAccount::new(second, "B", "B", 18, DEPLOYER)).unwrap();

        assert!(matches!(
            engine.set_stable_unit(&arena, ALICE, first),
            Err(MinterError::Unauthorized(_))
        ));
        assert_eq!(
            engine.set_stable_unit(&arena, DEPLOYER, TokenId::new([0x99; 32])),
            Err(MinterError::TokenNotFound(TokenId::new([0x99; 32])))
        );

        engine.set_stable_unit(&arena, DEPLOYER, first).unwrap();
        assert_eq!(engine.stable_unit_state(&arena), StableUnitState::Bound);

        assert_eq!(
            engine.set_stable_unit(&arena, DEPLOYER, second),
            Err(MinterError::AlreadyBound(first))
        );
        assert_eq!(engine.usdx_token(), Some(first));
    }

    #[test]
    fn test_registered_token_cannot_be_stable_unit() {
        let mut arena = TokenArena::new();
        let mut engine = MinterEngine::new(DEPLOYER, MinterConfig::default()).unwrap();
        let token = engine.create_token(&mut arena, ALICE, "Gold", "GLD", 10, ALICE).unwrap();

        assert_eq!(
            engine.set_stable_unit(&arena, DEPLOYER, token),
            Err(MinterError::InvalidStableUnit(token))
        );
        assert_eq!(engine.stable_unit_state(&arena), StableUnitState::Unbound);
    }

    #[test]
    fn test_deposit_requires_binding() {
        let mut arena = TokenArena::new();
        let mut engine = MinterEngine::new(DEPLOYER, MinterConfig::default()).unwrap();
        let token = engine.create_token(&mut arena, ALICE, "Gold", "GLD", 10, ALICE).unwrap();
        approve(&mut arena, token, ALICE, engine.contract_address(), 10);

        assert_eq!(
            engine.deposit_token(&mut arena, ALICE, token, 5),
            Err(MinterError::StableUnitUnbound)
        );
        assert_eq!(arena.require(&token).unwrap().balance_of(&ALICE), 10);
    }

    #[test]
    fn test_deposit_and_redeem() {
        let (mut engine, mut arena, stable) = active_engine();
        let engine_addr = engine.contract_address();
        let token = engine.create_token(&mut arena, ALICE, "Gold", "GLD", 1000, ALICE).unwrap();

        approve(&mut arena, token, ALICE, engine_addr, 100);
        let receipt = engine.deposit_token(&mut arena, ALICE, token, 100).unwrap();
        assert_eq!(receipt.reserve_after, 100);
        assert_eq!(receipt.stable_supply_after, 100);
        assert_eq!(arena.require(&stable).unwrap().balance_of(&ALICE), 100);

        approve(&mut arena, stable, ALICE, engine_addr, 100);
        let receipt = engine.redeem_token(&mut arena, ALICE, token, 100).unwrap();
        assert_eq!(receipt.reserve_after, 0);
        assert_eq!(receipt.stable_supply_after, 0);
        assert_eq!(arena.require(&token).unwrap().balance_of(&ALICE), 1000);
        assert_eq!(
            engine.exchange_totals(&token),
            ExchangeTotals { deposited: 100, redeemed: 100 }
        );
        engine.verify(&arena).unwrap();
    }

    #[test]
    fn test_cannot_exchange_the_stable_unit_itself() {
        let (mut engine, mut arena, stable) = active_engine();
        assert!(matches!(
            engine.deposit_token(&mut arena, ALICE, stable, 1),
            Err(MinterError::InvalidToken(_))
        ));
        assert!(matches!(
            engine.redeem_token(&mut arena, ALICE, stable, 1),
            Err(MinterError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_exchange_rejects_unregistered_token() {
        let (mut engine, mut arena, _) = active_engine();
        let side = TokenId::new([0x5d; 32]);
        arena.insert(TokenAccount::new(side, "Side", "SIDE", 18, ALICE)).unwrap();

        assert!(matches!(
            engine.deposit_token(&mut arena, ALICE, side, 0),
            Err(MinterError::InvalidToken(_))
        ));
        assert!(matches!(
            engine.redeem_token(&mut arena, ALICE, side, 0),
            Err(MinterError::InvalidToken(_))
        ));
        assert_eq!(engine.reserve_of(&side), 0);
        assert_eq!(engine.exchange_totals(&side), ExchangeTotals::default());
    }

    #[test]
    fn test_redeem_beyond_reserve() {
        let (mut engine, mut arena, stable) = active_engine();
        let engine_addr = engine.contract_address();
        let token = engine.create_token(&mut arena, ALICE, "Gold", "GLD", 1000, ALICE).unwrap();

        approve(&mut arena, token, ALICE, engine_addr, 50);
        engine.deposit_token(&mut arena, ALICE, token, 50).unwrap();
        approve(&mut arena, stable, ALICE, engine_addr, 60);

        assert_eq!(
            engine.redeem_token(&mut arena, ALICE, token, 60),
            Err(MinterError::InsufficientEngineReserve { token, have: 50, need: 60 })
        );
        assert_eq!(arena.require(&stable).unwrap().balance_of(&ALICE), 50);
        assert_eq!(arena.require(&stable).unwrap().allowance(&ALICE, &engine_addr), 60);
    }
}

//! Deployment wiring
//!
//! Brings a fresh ledger to the `Active` state in the order a deployment
//! runs it:
//! 1. Deploy the engine, administered by the deployer
//! 2. Deploy the stable unit, owned by the deployer
//! 3. Bind the stable unit to the engine
//! 4. Hand the stable unit's mint/burn authority to the engine

use lib_types::Address;

use crate::config::MinterConfig;
use crate::engine::StableUnitState;
use crate::errors::{MinterError, MinterResult};
use crate::ledger::Ledger;

/// Build a ledger whose engine holds exclusive authority over the stable unit
pub fn bootstrap(deployer: Address, config: &MinterConfig) -> MinterResult<Ledger> {
    config.validate()?;

    let mut ledger = Ledger::new(deployer, config.clone())?;
    let engine = ledger.contract_address();
    tracing::info!("Genesis: engine deployed to {}", engine);

    let usdx = ledger.genesis_token(
        deployer,
        &config.stable_name,
        &config.stable_symbol,
        config.default_decimals,
    )?;
    tracing::info!("Genesis: {} deployed to {}", config.stable_symbol, usdx);

    ledger.set_usdx_token(deployer, usdx)?;
    ledger.transfer_ownership(deployer, usdx, engine)?;

    if ledger.stable_unit_state() != StableUnitState::Active {
        return Err(MinterError::InvariantViolated(
            "stable unit authority was not handed to the engine".to_string(),
        ));
    }
    tracing::info!("Genesis: {} ownership transferred to engine", config.stable_symbol);
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LedgerEvent;

    #[test]
    fn test_bootstrap_activates_stable_unit() {
        let deployer = Address::new([1u8; 32]);
        let ledger = bootstrap(deployer, &MinterConfig::default()).unwrap();

        let usdx = ledger.usdx_token().unwrap();
        let info = ledger.token_info(&usdx).unwrap();
        assert_eq!(info.name, "USDx Token");
        assert_eq!(info.symbol, "USDx");
        assert_eq!(info.decimals, 18);
        assert_eq!(info.total_supply, 0);
        assert_eq!(info.owner, ledger.contract_address());
        assert_eq!(ledger.engine().owner(), deployer);

        let kinds: Vec<&LedgerEvent> = ledger.events().iter().map(|r| &r.event).collect();
        assert!(matches!(kinds[0], LedgerEvent::GenesisTokenCreated { .. }));
        assert!(matches!(kinds[1], LedgerEvent::StableUnitBound { .. }));
        assert!(matches!(kinds[2], LedgerEvent::OwnershipTransferred { .. }));
    }

    #[test]
    fn test_bootstrap_rejects_bad_config() {
        let config = MinterConfig {
            stable_symbol: String::new(),
            ..MinterConfig::default()
        };
        assert!(bootstrap(Address::new([1u8; 32]), &config).is_err());
    }
}

//! Execution context for token calls
//!
//! Spending and minting authority is derived from the immutable context,
//! never from user-supplied parameters.

use lib_types::Address;
use serde::{Deserialize, Serialize};

use crate::errors::{TokenError, TokenResult};

/// Origin of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOrigin {
    /// User-initiated call: acts as ctx.caller
    User,
    /// Contract sub-call (the exchange engine): acts as ctx.contract
    Contract,
    /// System-level call: reserved
    System,
}

/// Immutable context passed to every token call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Account that submitted the call
    pub caller: Address,
    /// Contract executing on the caller's behalf (zero for direct user calls)
    pub contract: Address,
    /// Origin of this call
    pub call_origin: CallOrigin,
}

impl ExecutionContext {
    /// Context for a call submitted directly by `caller`
    pub fn user(caller: Address) -> Self {
        Self {
            caller,
            contract: Address::zero(),
            call_origin: CallOrigin::User,
        }
    }

    /// Context for a sub-call made by `contract` while serving `caller`
    pub fn with_contract(caller: Address, contract: Address) -> Self {
        Self {
            caller,
            contract,
            call_origin: CallOrigin::Contract,
        }
    }

    /// The principal whose balance and authority this call exercises
    pub fn acting_principal(&self) -> TokenResult<Address> {
        match self.call_origin {
            CallOrigin::User => Ok(self.caller),
            CallOrigin::Contract => Ok(self.contract),
            CallOrigin::System => Err(TokenError::Unauthorized(
                "system calls cannot act on token balances".to_string(),
            )),
        }
    }
}

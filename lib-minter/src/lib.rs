//! USDx Minting & Exchange Engine
//!
//! Creates custom tokens, binds the USDx stable unit and exchanges custom
//! tokens for USDx (and back) at 1:1 in minimal units.
//!
//! # Layout
//!
//! - [`arena`]: every [`TokenAccount`](lib_tokens::TokenAccount), indexed by id
//! - [`registry`]: ordered ids of engine-created tokens
//! - [`engine`]: creation, stable binding, deposit and redeem
//! - [`ledger`]: client-facing facade with the event log
//! - [`genesis`]: deployment wiring to the `Active` state
//! - [`store`]: JSON persistence
//!
//! ```text
//! create_token ──► TokenAccount (owned by engine) ──► registry
//! deposit: token.transfer_from(user → engine) ─► usdx.mint(user)
//! redeem:  usdx.transfer_from(user → engine) ─► usdx.burn ─► token.transfer(engine → user)
//! ```

pub mod arena;
pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod genesis;
pub mod ledger;
pub mod registry;
pub mod store;
pub mod token_id;

pub use arena::TokenArena;
pub use config::{MinterConfig, MAX_DECIMALS};
pub use engine::{ExchangeReceipt, ExchangeTotals, MinterEngine, StableBinding, StableUnitState};
pub use errors::{MinterError, MinterResult};
pub use events::{EventLog, LedgerEvent, RecordedEvent};
pub use genesis::bootstrap;
pub use ledger::{BalanceRow, Ledger};
pub use registry::TokenRegistry;
pub use store::{load_ledger, save_ledger, STATE_VERSION};

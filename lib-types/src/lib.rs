//! USDx ledger primitives.
//! Stable, protocol-neutral, behavior-free.
//!
//! Rule: No String identifiers in ledger state. Ever.

pub mod primitives;
pub mod units;

pub use primitives::{Address, Amount, ParseIdError, TokenId};
pub use units::{format_units, parse_units, scale_factor};

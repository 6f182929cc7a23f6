//! Pure functional business logic
//!
//! Functions here take inputs and return outputs: no I/O, no printing and
//! no ledger mutation. The command shell composes them.

pub mod accounts;
pub mod amounts;
pub mod config;
pub mod paths;
pub mod tokens;

pub use accounts::{label_address, parse_account, ENGINE_KEYWORD};
pub use amounts::{display_amount, parse_amount};
pub use config::{log_filter, validate_log_level};
pub use paths::{expand_home_directory, normalize_path};
pub use tokens::resolve_token;

//! Command handlers
//!
//! Each handler loads the ledger state, performs its calls and writes the
//! state back only when every call succeeded.

pub mod common;
pub mod exchange;
pub mod info;
pub mod init;
pub mod report;
pub mod token;

pub use common::CommandContext;

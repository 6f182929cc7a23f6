//! Shared state handling for command handlers

use crate::argument_parsing::{OutputFormat, UsdxCli};
use crate::cli_config::{default_state_path, CliConfig};
use crate::error::{CliError, CliResult};
use crate::logic::{normalize_path, parse_account};
use crate::output::Output;

use lib_minter::{Ledger, MinterConfig};
use lib_types::Address;
use serde::Serialize;
use std::path::PathBuf;

/// Settings resolved from flags, environment and config for one invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub state_path: PathBuf,
    pub account: Option<String>,
    pub format: OutputFormat,
    pub minter: MinterConfig,
}

impl CommandContext {
    /// Flags win over the config file
    pub fn from_cli(cli: &UsdxCli, config: &CliConfig) -> CliResult<Self> {
        let state_path = match cli.state.as_deref().or(config.state_path.as_deref()) {
            Some(path) => normalize_path(path)?,
            None => default_state_path(),
        };

        Ok(Self {
            state_path,
            account: cli.account.clone().or_else(|| config.default_account.clone()),
            format: cli.format,
            minter: config.minter.clone(),
        })
    }

    pub fn load_ledger(&self) -> CliResult<Ledger> {
        if !self.state_path.exists() {
            return Err(CliError::StateNotFound(self.state_path.display().to_string()));
        }
        Ok(lib_minter::load_ledger(&self.state_path)?)
    }

    pub fn save_ledger(&self, ledger: &Ledger) -> CliResult<()> {
        Ok(lib_minter::save_ledger(&self.state_path, ledger)?)
    }

    /// The account submitting this invocation's calls
    pub fn caller(&self, ledger: &Ledger) -> CliResult<Address> {
        let account = self.account.as_deref().ok_or(CliError::MissingAccount)?;
        parse_account(account, ledger.contract_address())
    }

    /// Print `value` as JSON, or run `table` for human-readable output.
    ///
    /// Serialized straight to text: amounts above `u64::MAX` do not fit a
    /// `serde_json::Value`.
    pub fn emit<O, T, F>(&self, output: &O, value: &T, table: F) -> CliResult<()>
    where
        O: Output,
        T: Serialize + ?Sized,
        F: FnOnce(&O) -> CliResult<()>,
    {
        match self.format {
            OutputFormat::Json => output.print(&serde_json::to_string_pretty(value)?),
            OutputFormat::Table => table(output),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig {
            state_path: Some("/from/config.json".to_string()),
            default_account: Some("carol".to_string()),
            ..CliConfig::default()
        };

        let cli = UsdxCli::try_parse_from(["usdx", "--state", "/from/flag.json", "info"]).unwrap();
        let ctx = CommandContext::from_cli(&cli, &config).unwrap();
        assert_eq!(ctx.state_path, PathBuf::from("/from/flag.json"));
        assert_eq!(ctx.account.as_deref(), Some("carol"));

        let cli = UsdxCli::try_parse_from(["usdx", "--account", "dave", "info"]).unwrap();
        let ctx = CommandContext::from_cli(&cli, &config).unwrap();
        assert_eq!(ctx.state_path, PathBuf::from("/from/config.json"));
        assert_eq!(ctx.account.as_deref(), Some("dave"));
    }

    #[test]
    fn test_missing_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_support::context(&dir, "alice", OutputFormat::Table);
        assert!(matches!(ctx.load_ledger(), Err(CliError::StateNotFound(_))));
    }
}

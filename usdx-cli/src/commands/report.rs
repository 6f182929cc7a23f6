//! Read-only reports: `usdx balances` and `usdx events`

use crate::argument_parsing::{BalancesArgs, EventsArgs};
use crate::commands::CommandContext;
use crate::error::CliResult;
use crate::logic::{display_amount, parse_account};
use crate::output::Output;

use serde::Serialize;

#[derive(Debug, Serialize)]
struct BalanceView {
    token: String,
    name: String,
    symbol: String,
    decimals: u8,
    balance: String,
    stable: bool,
}

pub fn handle_balances_command<O: Output>(args: &BalancesArgs, ctx: &CommandContext, output: &O) -> CliResult<()> {
    let ledger = ctx.load_ledger()?;
    let account = match &args.of {
        Some(of) => parse_account(of, ledger.contract_address())?,
        None => ctx.caller(&ledger)?,
    };

    let rows = ledger.balances_for(&account);
    let views: Vec<BalanceView> = rows
        .iter()
        .map(|row| BalanceView {
            token: row.token.to_string(),
            name: row.name.clone(),
            symbol: row.symbol.clone(),
            decimals: row.decimals,
            balance: row.balance.to_string(),
            stable: row.stable,
        })
        .collect();

    ctx.emit(output, &views, |out| {
        out.header(&format!("Balances of {}", account))?;
        if rows.is_empty() {
            return out.info("No tokens on this ledger yet");
        }
        for row in &rows {
            let marker = if row.stable { "*" } else { " " };
            out.print(&format!(
                "{} {:<16} {:<24} {}",
                marker,
                row.token.short(),
                row.name,
                display_amount(row.balance, row.decimals, &row.symbol)
            ))?;
        }
        Ok(())
    })
}

pub fn handle_events_command<O: Output>(args: &EventsArgs, ctx: &CommandContext, output: &O) -> CliResult<()> {
    let ledger = ctx.load_ledger()?;
    let records = ledger.events_since(args.since);

    ctx.emit(output, records, |out| {
        if records.is_empty() {
            return out.info(&format!("No events since #{}", args.since));
        }
        for record in records {
            out.print(&format!("#{:<5} {}", record.sequence, record.event))?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument_parsing::{CreateArgs, InitArgs, OutputFormat};
    use crate::commands::common::test_support::{as_account, context};
    use crate::commands::init::handle_init_command;
    use crate::commands::token::handle_create_command;
    use crate::output::testing::MockOutput;

    fn with_gold(dir: &tempfile::TempDir, format: OutputFormat) -> CommandContext {
        let ctx = context(dir, "deployer", format);
        handle_init_command(&InitArgs { deployer: None, force: false }, &ctx, &MockOutput::new()).unwrap();
        let alice = as_account(&ctx, "alice");
        let create = CreateArgs {
            name: "Gold".to_string(),
            symbol: "GLD".to_string(),
            supply: "12.5".to_string(),
            recipient: None,
        };
        handle_create_command(&create, &alice, &MockOutput::new()).unwrap();
        alice
    }

    #[test]
    fn test_balances_table_marks_stable_unit() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = with_gold(&dir, OutputFormat::Table);
        let output = MockOutput::new();

        handle_balances_command(&BalancesArgs { of: None }, &ctx, &output).unwrap();

        let messages = output.get_messages();
        assert!(messages.iter().any(|m| m.starts_with('*') && m.contains("0 USDx")));
        assert!(messages.iter().any(|m| m.contains("12.5 GLD")));
    }

    #[test]
    fn test_balances_of_other_account() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = with_gold(&dir, OutputFormat::Json);
        let output = MockOutput::new();

        handle_balances_command(&BalancesArgs { of: Some("bob".to_string()) }, &ctx, &output).unwrap();

        let rows: serde_json::Value = serde_json::from_str(&output.transcript()).unwrap();
        assert_eq!(rows[0]["stable"], true);
        assert_eq!(rows[1]["symbol"], "GLD");
        assert_eq!(rows[1]["balance"], "0");
    }

    #[test]
    fn test_events_since() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = with_gold(&dir, OutputFormat::Table);
        let output = MockOutput::new();

        handle_events_command(&EventsArgs { since: 3 }, &ctx, &output).unwrap();

        assert_eq!(output.get_messages().len(), 1);
        output.assert_contains_message("#3");
        output.assert_contains_message("TokenCreated(GLD");
    }

    #[test]
    fn test_events_json_keeps_full_precision() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = with_gold(&dir, OutputFormat::Json);
        let output = MockOutput::new();

        handle_events_command(&EventsArgs { since: 0 }, &ctx, &output).unwrap();

        let records: serde_json::Value = serde_json::from_str(&output.transcript()).unwrap();
        assert!(records[0]["event"]["GenesisTokenCreated"].is_object());

        let created = &records[3]["event"]["TokenCreated"];
        assert!(created["initial_supply"].is_string());
        assert_eq!(created["initial_supply"], "12500000000000000000");
    }
}

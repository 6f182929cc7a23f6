//! `usdx info`: engine and stable unit overview

use crate::commands::CommandContext;
use crate::error::CliResult;
use crate::logic::display_amount;
use crate::output::Output;

use serde_json::json;

pub fn handle_info_command<O: Output>(ctx: &CommandContext, output: &O) -> CliResult<()> {
    let ledger = ctx.load_ledger()?;
    let engine = ledger.engine();
    let stable = match ledger.usdx_token() {
        Some(id) => Some(ledger.token_info(&id)?),
        None => None,
    };

    let value = json!({
        "engine": engine.contract_address().to_string(),
        "owner": engine.owner().to_string(),
        "usdx_token": stable.as_ref().map(|info| info.token_id.to_string()),
        "usdx_total_supply": stable.as_ref().map(|info| info.total_supply.to_string()),
        "stable_unit_state": format!("{:?}", ledger.stable_unit_state()),
        "token_count": ledger.all_tokens().len(),
        "event_count": ledger.events().len(),
        "config": engine.config(),
    });

    ctx.emit(output, &value, |out| {
        out.header("USDx Engine")?;
        out.print(&format!("{:<14} {}", "Engine", engine.contract_address()))?;
        out.print(&format!("{:<14} {}", "Owner", engine.owner()))?;
        match &stable {
            Some(info) => {
                out.print(&format!("{:<14} {} ({})", "Stable unit", info.token_id, info.symbol))?;
                out.print(&format!(
                    "{:<14} {}",
                    "Supply",
                    display_amount(info.total_supply, info.decimals, &info.symbol)
                ))?;
            }
            None => out.warning("No stable unit bound")?,
        }
        out.print(&format!("{:<14} {:?}", "State", ledger.stable_unit_state()))?;
        out.print(&format!("{:<14} {}", "Tokens", ledger.all_tokens().len()))?;
        out.print(&format!("{:<14} {}", "Events", ledger.events().len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument_parsing::{InitArgs, OutputFormat};
    use crate::commands::common::test_support::context;
    use crate::commands::init::handle_init_command;
    use crate::output::testing::MockOutput;

    #[test]
    fn test_info_reports_active_stable_unit() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, "deployer", OutputFormat::Table);
        handle_init_command(&InitArgs { deployer: None, force: false }, &ctx, &MockOutput::new()).unwrap();

        let output = MockOutput::new();
        handle_info_command(&ctx, &output).unwrap();
        output.assert_contains_message("Active");
        output.assert_contains_message("0 USDx");
    }
}

//! `usdx init`: deploy a fresh ledger

use crate::argument_parsing::InitArgs;
use crate::commands::CommandContext;
use crate::error::{CliError, CliResult};
use crate::logic::{parse_account, ENGINE_KEYWORD};
use crate::output::Output;

use lib_minter::bootstrap;
use lib_types::Address;
use serde_json::json;

pub fn handle_init_command<O: Output>(args: &InitArgs, ctx: &CommandContext, output: &O) -> CliResult<()> {
    if ctx.state_path.exists() && !args.force {
        return Err(CliError::StateExists(ctx.state_path.display().to_string()));
    }

    let deployer_arg = args
        .deployer
        .as_deref()
        .or(ctx.account.as_deref())
        .ok_or(CliError::MissingAccount)?;
    // No engine exists yet, so the keyword cannot name the deployer.
    if deployer_arg.trim().eq_ignore_ascii_case(ENGINE_KEYWORD) {
        return Err(CliError::InvalidAccount(deployer_arg.to_string()));
    }
    let deployer = parse_account(deployer_arg, Address::zero())?;

    let ledger = bootstrap(deployer, &ctx.minter)?;
    ctx.save_ledger(&ledger)?;

    let usdx = ledger.usdx_token();
    let value = json!({
        "state": ctx.state_path.display().to_string(),
        "deployer": deployer.to_string(),
        "engine": ledger.contract_address().to_string(),
        "usdx_token": usdx.map(|id| id.to_string()),
        "stable_unit_state": format!("{:?}", ledger.stable_unit_state()),
    });

    ctx.emit(output, &value, |out| {
        out.success(&format!("Ledger deployed to {}", ctx.state_path.display()))?;
        out.info(&format!("Deployer:    {}", deployer))?;
        out.info(&format!("Engine:      {}", ledger.contract_address()))?;
        if let Some(id) = usdx {
            out.info(&format!("{} token: {}", ctx.minter.stable_symbol, id))?;
        }
        out.info(&format!("Stable unit: {:?}", ledger.stable_unit_state()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument_parsing::OutputFormat;
    use crate::commands::common::test_support::context;
    use crate::logic::label_address;
    use crate::output::testing::MockOutput;
    use lib_minter::StableUnitState;

    fn init_args() -> InitArgs {
        InitArgs {
            deployer: None,
            force: false,
        }
    }

    #[test]
    fn test_init_deploys_active_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, "deployer", OutputFormat::Table);
        let output = MockOutput::new();

        handle_init_command(&init_args(), &ctx, &output).unwrap();

        let ledger = ctx.load_ledger().unwrap();
        assert_eq!(ledger.stable_unit_state(), StableUnitState::Active);
        assert_eq!(ledger.engine().owner(), label_address("deployer"));
        output.assert_contains_message("Ledger deployed");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, "deployer", OutputFormat::Table);
        let output = MockOutput::new();
        handle_init_command(&init_args(), &ctx, &output).unwrap();

        assert!(matches!(
            handle_init_command(&init_args(), &ctx, &output),
            Err(CliError::StateExists(_))
        ));

        let forced = InitArgs {
            deployer: Some("someone-else".to_string()),
            force: true,
        };
        handle_init_command(&forced, &ctx, &output).unwrap();
        assert_eq!(
            ctx.load_ledger().unwrap().engine().owner(),
            label_address("someone-else")
        );
    }

    #[test]
    fn test_init_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, "deployer", OutputFormat::Json);
        let output = MockOutput::new();
        handle_init_command(&init_args(), &ctx, &output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output.transcript()).unwrap();
        assert_eq!(value["stable_unit_state"], "Active");
        assert_eq!(value["deployer"], label_address("deployer").to_string());
    }
}

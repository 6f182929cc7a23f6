//! `usdx deposit` / `usdx redeem`: 1:1 exchange against the engine
//!
//! With `--approve` the engine allowance is set and the exchange runs in the
//! same invocation; the state file is written only if both succeed.

use crate::argument_parsing::ExchangeArgs;
use crate::commands::CommandContext;
use crate::error::{CliError, CliResult};
use crate::logic::{display_amount, parse_amount, resolve_token};
use crate::output::Output;

use lib_minter::ExchangeReceipt;
use lib_tokens::TokenInfo;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Deposit,
    Redeem,
}

pub fn handle_deposit_command<O: Output>(args: &ExchangeArgs, ctx: &CommandContext, output: &O) -> CliResult<()> {
    exchange(Direction::Deposit, args, ctx, output)
}

pub fn handle_redeem_command<O: Output>(args: &ExchangeArgs, ctx: &CommandContext, output: &O) -> CliResult<()> {
    exchange(Direction::Redeem, args, ctx, output)
}

fn exchange<O: Output>(direction: Direction, args: &ExchangeArgs, ctx: &CommandContext, output: &O) -> CliResult<()> {
    let mut ledger = ctx.load_ledger()?;
    let caller = ctx.caller(&ledger)?;
    let token = resolve_token(&args.token, &ledger)?;
    let usdx = ledger
        .usdx_token()
        .ok_or_else(|| CliError::Ledger(lib_minter::MinterError::StableUnitUnbound))?;
    let custom = ledger.token_info(&token)?;
    let stable = ledger.token_info(&usdx)?;
    let amount = parse_amount(&args.amount, custom.decimals)?;

    if args.approve {
        // The engine pulls the custom token on deposit and USDx on redeem.
        let spent = match direction {
            Direction::Deposit => token,
            Direction::Redeem => usdx,
        };
        let engine = ledger.contract_address();
        ledger.approve(caller, spent, engine, amount)?;
    }

    let receipt = match direction {
        Direction::Deposit => ledger.deposit_token(caller, token, amount)?,
        Direction::Redeem => ledger.redeem_token(caller, token, amount)?,
    };
    ctx.save_ledger(&ledger)?;

    report(direction, &receipt, &custom, &stable, ctx, output)
}

fn report<O: Output>(
    direction: Direction,
    receipt: &ExchangeReceipt,
    custom: &TokenInfo,
    stable: &TokenInfo,
    ctx: &CommandContext,
    output: &O,
) -> CliResult<()> {
    let value = json!({
        "direction": format!("{:?}", direction).to_lowercase(),
        "token": receipt.token.to_string(),
        "account": receipt.account.to_string(),
        "amount": receipt.amount.to_string(),
        "reserve_after": receipt.reserve_after.to_string(),
        "usdx_supply_after": receipt.stable_supply_after.to_string(),
    });

    ctx.emit(output, &value, |out| {
        let custom_amount = display_amount(receipt.amount, custom.decimals, &custom.symbol);
        let stable_amount = display_amount(receipt.amount, stable.decimals, &stable.symbol);
        match direction {
            Direction::Deposit => out.success(&format!("Deposited {} for {}", custom_amount, stable_amount))?,
            Direction::Redeem => out.success(&format!("Redeemed {} for {}", stable_amount, custom_amount))?,
        }
        out.info(&format!(
            "Engine reserve: {}",
            display_amount(receipt.reserve_after, custom.decimals, &custom.symbol)
        ))?;
        out.info(&format!(
            "{} supply: {}",
            stable.symbol,
            display_amount(receipt.stable_supply_after, stable.decimals, &stable.symbol)
        ))
    })
}

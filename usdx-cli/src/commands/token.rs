//! Token commands
//!
//! - `create`: new custom token through the engine
//! - `approve`: set a spender's allowance
//! - `transfer`: holder-to-holder transfer
//! - `tokens`: every engine-created token

use crate::argument_parsing::{ApproveArgs, CreateArgs, TransferArgs};
use crate::commands::CommandContext;
use crate::error::CliResult;
use crate::logic::{display_amount, parse_account, parse_amount, resolve_token};
use crate::output::Output;

use lib_types::format_units;
use serde::Serialize;
use serde_json::json;

/// One row of `usdx tokens`
#[derive(Debug, Serialize)]
struct TokenRow {
    token: String,
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: String,
    holders: usize,
    engine_reserve: String,
}

pub fn handle_create_command<O: Output>(args: &CreateArgs, ctx: &CommandContext, output: &O) -> CliResult<()> {
    let mut ledger = ctx.load_ledger()?;
    let caller = ctx.caller(&ledger)?;
    let recipient = match &args.recipient {
        Some(recipient) => parse_account(recipient, ledger.contract_address())?,
        None => caller,
    };
    let decimals = ledger.engine().config().default_decimals;
    let supply = parse_amount(&args.supply, decimals)?;

    let token = ledger.create_token(caller, &args.name, &args.symbol, supply, recipient)?;
    ctx.save_ledger(&ledger)?;

    let value = json!({
        "token": token.to_string(),
        "name": args.name,
        "symbol": args.symbol,
        "decimals": decimals,
        "initial_supply": supply.to_string(),
        "recipient": recipient.to_string(),
    });
    ctx.emit(output, &value, |out| {
        out.success(&format!("Token created: {} ({})", args.name, args.symbol))?;
        out.info(&format!("Token ID: {}", token))?;
        out.info(&format!(
            "Minted {} to {}",
            display_amount(supply, decimals, &args.symbol),
            recipient
        ))
    })
}

pub fn handle_approve_command<O: Output>(args: &ApproveArgs, ctx: &CommandContext, output: &O) -> CliResult<()> {
    let mut ledger = ctx.load_ledger()?;
    let caller = ctx.caller(&ledger)?;
    let token = resolve_token(&args.token, &ledger)?;
    let spender = parse_account(&args.spender, ledger.contract_address())?;
    let info = ledger.token_info(&token)?;
    let amount = parse_amount(&args.amount, info.decimals)?;

    ledger.approve(caller, token, spender, amount)?;
    ctx.save_ledger(&ledger)?;

    let value = json!({
        "token": token.to_string(),
        "owner": caller.to_string(),
        "spender": spender.to_string(),
        "amount": amount.to_string(),
    });
    ctx.emit(output, &value, |out| {
        out.success(&format!(
            "Approved {} to spend {}",
            spender,
            display_amount(amount, info.decimals, &info.symbol)
        ))
    })
}

pub fn handle_transfer_command<O: Output>(args: &TransferArgs, ctx: &CommandContext, output: &O) -> CliResult<()> {
    let mut ledger = ctx.load_ledger()?;
    let caller = ctx.caller(&ledger)?;
    let token = resolve_token(&args.token, &ledger)?;
    let to = parse_account(&args.to, ledger.contract_address())?;
    let info = ledger.token_info(&token)?;
    let amount = parse_amount(&args.amount, info.decimals)?;

    ledger.transfer(caller, token, to, amount)?;
    ctx.save_ledger(&ledger)?;

    let value = json!({
        "token": token.to_string(),
        "from": caller.to_string(),
        "to": to.to_string(),
        "amount": amount.to_string(),
    });
    ctx.emit(output, &value, |out| {
        out.success(&format!(
            "Sent {} to {}",
            display_amount(amount, info.decimals, &info.symbol),
            to
        ))
    })
}

pub fn handle_tokens_command<O: Output>(ctx: &CommandContext, output: &O) -> CliResult<()> {
    let ledger = ctx.load_ledger()?;

    let mut rows = Vec::with_capacity(ledger.all_tokens().len());
    for id in ledger.all_tokens() {
        let token = ledger.token(id)?;
        rows.push(TokenRow {
            token: id.to_string(),
            name: token.name().to_string(),
            symbol: token.symbol().to_string(),
            decimals: token.decimals(),
            total_supply: token.total_supply().to_string(),
            holders: token.holder_count(),
            engine_reserve: ledger.reserve_of(id).to_string(),
        });
    }

    ctx.emit(output, &rows, |out| {
        if rows.is_empty() {
            return out.info("No tokens created yet");
        }
        out.header(&format!("Tokens ({})", rows.len()))?;
        out.print(&format!(
            "{:<4} {:<16} {:<10} {:>24} {:>8} {:>24}",
            "#", "ID", "SYMBOL", "SUPPLY", "HOLDERS", "RESERVE"
        ))?;
        for (i, id) in ledger.all_tokens().iter().enumerate() {
            let token = ledger.token(id)?;
            out.print(&format!(
                "{:<4} {:<16} {:<10} {:>24} {:>8} {:>24}",
                i,
                id.short(),
                token.symbol(),
                format_units(token.total_supply(), token.decimals()),
                token.holder_count(),
                format_units(ledger.reserve_of(id), token.decimals())
            ))?;
        }
        Ok(())
    })
}

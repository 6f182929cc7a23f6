//! USDx CLI argument parsing
//!
//! Global flags may appear before or after the subcommand. Every flag has an
//! environment fallback so scripted sessions can fix the state file and the
//! acting account once.

use crate::cli_config::{load_config, CliConfig};
use crate::commands::{self, CommandContext};
use crate::error::CliResult;
use crate::logic::log_filter;
use crate::output::{ConsoleOutput, Output};

use clap::{Args, Parser, Subcommand, ValueEnum};

/// USDx minting and exchange ledger CLI
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(name = "usdx")]
pub struct UsdxCli {
    /// Ledger state file (default: ~/.usdx/ledger.json)
    #[arg(short, long, global = true, env = "USDX_STATE")]
    pub state: Option<String>,

    /// Configuration file path (default: ~/.usdx/config.toml)
    #[arg(short, long, global = true, env = "USDX_CONFIG")]
    pub config: Option<String>,

    /// Account submitting the call: 64 hex characters or a label such as `alice`
    #[arg(short, long, global = true, env = "USDX_ACCOUNT")]
    pub account: Option<String>,

    /// Enable debug logging (`USDX_VERBOSE` accepts 1/0, yes/no, on/off)
    #[arg(
        short,
        long,
        global = true,
        env = "USDX_VERBOSE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table, env = "USDX_FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: UsdxCommand,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// USDx commands
#[derive(Subcommand, Debug, Clone)]
pub enum UsdxCommand {
    /// Deploy a fresh ledger: engine, USDx stable unit and authority hand-off
    Init(InitArgs),

    /// Show the engine, its owner and the stable unit
    Info,

    /// Create a custom token through the engine
    Create(CreateArgs),

    /// Allow a spender (the engine by default) to move your tokens
    Approve(ApproveArgs),

    /// Exchange a custom token for USDx at 1:1
    Deposit(ExchangeArgs),

    /// Exchange USDx back for a custom token at 1:1
    Redeem(ExchangeArgs),

    /// Send tokens to another account
    Transfer(TransferArgs),

    /// List every token the engine created
    Tokens,

    /// Show an account's balance of USDx and every custom token
    Balances(BalancesArgs),

    /// Show the ledger event log
    Events(EventsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Deployer account (defaults to --account)
    #[arg(long)]
    pub deployer: Option<String>,

    /// Replace an existing state file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Token name (e.g., "Gold")
    #[arg(long)]
    pub name: String,

    /// Token symbol (e.g., "GLD")
    #[arg(long)]
    pub symbol: String,

    /// Initial supply in whole tokens (e.g., "1000" or "12.5")
    #[arg(long)]
    pub supply: String,

    /// Recipient of the initial supply (defaults to the caller)
    #[arg(long)]
    pub recipient: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ApproveArgs {
    /// Token id, symbol, or `usdx`
    #[arg(long)]
    pub token: String,

    /// Spender account, or `engine`
    #[arg(long, default_value = "engine")]
    pub spender: String,

    /// Allowance in whole tokens; replaces any previous allowance
    #[arg(long)]
    pub amount: String,
}

#[derive(Args, Debug, Clone)]
pub struct ExchangeArgs {
    /// Custom token id or symbol
    #[arg(long)]
    pub token: String,

    /// Amount in whole tokens
    #[arg(long)]
    pub amount: String,

    /// Approve the engine for exactly this amount first
    #[arg(long)]
    pub approve: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TransferArgs {
    /// Token id, symbol, or `usdx`
    #[arg(long)]
    pub token: String,

    /// Recipient account
    #[arg(long)]
    pub to: String,

    /// Amount in whole tokens
    #[arg(long)]
    pub amount: String,
}

#[derive(Args, Debug, Clone)]
pub struct BalancesArgs {
    /// Account to inspect (defaults to --account)
    #[arg(long)]
    pub of: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EventsArgs {
    /// First sequence number to show
    #[arg(long, default_value_t = 0)]
    pub since: u64,
}

fn init_logging(verbose: bool, config: &CliConfig) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(verbose, rust_log.as_deref(), config.log_level.as_deref());

    // Logs go to stderr so `--format json` output stays machine-readable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse arguments, load config, set up logging and run the command
pub fn run_cli() -> anyhow::Result<()> {
    let cli = UsdxCli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.verbose, &config);

    execute(&cli, &config, &ConsoleOutput)?;
    Ok(())
}

/// Run an already-parsed command against the configured state file
pub fn execute<O: Output>(cli: &UsdxCli, config: &CliConfig, output: &O) -> CliResult<()> {
    let ctx = CommandContext::from_cli(cli, config)?;
    tracing::debug!("usdx {:?} (state {})", cli.command, ctx.state_path.display());

    match &cli.command {
        UsdxCommand::Init(args) => commands::init::handle_init_command(args, &ctx, output),
        UsdxCommand::Info => commands::info::handle_info_command(&ctx, output),
        UsdxCommand::Create(args) => commands::token::handle_create_command(args, &ctx, output),
        UsdxCommand::Approve(args) => commands::token::handle_approve_command(args, &ctx, output),
        UsdxCommand::Transfer(args) => commands::token::handle_transfer_command(args, &ctx, output),
        UsdxCommand::Tokens => commands::token::handle_tokens_command(&ctx, output),
        UsdxCommand::Deposit(args) => commands::exchange::handle_deposit_command(args, &ctx, output),
        UsdxCommand::Redeem(args) => commands::exchange::handle_redeem_command(args, &ctx, output),
        UsdxCommand::Balances(args) => commands::report::handle_balances_command(args, &ctx, output),
        UsdxCommand::Events(args) => commands::report::handle_events_command(args, &ctx, output),
    }
}

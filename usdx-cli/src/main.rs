//! USDx Command-Line Interface
//!
//! Entry point for the `usdx` binary. Parses command-line arguments
//! and delegates to the appropriate command handler.

use usdx_cli::run_cli;

fn main() -> anyhow::Result<()> {
    run_cli()
}

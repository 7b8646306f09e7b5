//! invoicegen CLI entry point
//!
//! Parses arguments, runs the command, and turns errors into a colored
//! message plus the process exit code:
//! - `0` success
//! - `2` no input files found
//! - `3` data read error
//! - `4` no records found
//! - `5` render error
//! - `1` anything else

use clap::Parser;
use invoicegen_cli::cli;
use invoicegen_cli::core::error::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(error_ctx.exit_code());
    }
}

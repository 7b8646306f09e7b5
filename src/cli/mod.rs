//! Command-line interface for invoicegen.
//!
//! The CLI is a thin, non-interactive layer over [`crate::pipeline`]. Every
//! command takes explicit paths and never creates the `data/`, `templates/`,
//! or `output/` layout on its own.
//!
//! # Commands
//!
//! - `files` - List data files and templates in the working directories
//! - `ids` - List the identifiers of a data file
//! - `render` - Render one record through a template into a document
//! - `show` - Print one record as JSON
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Use a specific config file (also `INVOICEGEN_CONFIG`)
//!
//! # Example
//!
//! ```bash
//! invoicegen files
//! invoicegen ids data/invoices.csv
//! invoicegen render data/invoices.csv templates/invoice.html INV-001
//! invoicegen render data/invoices.json templates/invoice.html INV-001 --format html -o out.html
//! ```

mod files;
mod ids;
mod render;
mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Runtime settings derived from global flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,

    /// Explicit config file, if any
    pub config_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            config_path: None,
        }
    }
}

impl CliConfig {
    /// Install the global tracing subscriber writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over [`CliConfig::log_level`]. Calling
    /// this more than once is harmless.
    pub fn init_logging(&self) {
        let filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the configuration file this run uses.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is invalid.
    pub fn load_config(&self) -> Result<Config> {
        Config::load_with_optional(self.config_path.clone())
    }
}

/// Render invoices and other documents from CSV/JSON records and HTML templates.
#[derive(Parser, Debug)]
#[command(
    name = "invoicegen",
    about = "Render one record from a CSV or JSON file through an HTML template",
    version,
    long_about = "invoicegen picks one record from a CSV or JSON data file by its identifier, \
                  fills an HTML template with the record's fields, and hands the result to a \
                  document engine (WeasyPrint for PDF, or plain HTML)."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file
    ///
    /// Defaults to `~/.invoicegen/config.toml` (`%LOCALAPPDATA%\invoicegen\config.toml`
    /// on Windows). A missing file means built-in defaults.
    #[arg(short, long, global = true, env = "INVOICEGEN_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List data files and templates.
    ///
    /// Exits with code 2 when either list is empty.
    Files(files::FilesCommand),

    /// List the identifiers of a data file, sorted case-insensitively.
    Ids(ids::IdsCommand),

    /// Render one record into a document.
    Render(render::RenderCommand),

    /// Print one record as pretty JSON.
    Show(show::ShowCommand),
}

impl Cli {
    /// Build a [`CliConfig`] from the global flags.
    ///
    /// - `--verbose` → `debug`
    /// - `--quiet` → `error`
    /// - otherwise → `warn`
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    /// Set up logging and run the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's error for display by the caller.
    pub fn execute(self) -> Result<()> {
        let cli_config = self.build_config();
        cli_config.init_logging();
        self.execute_with_config(&cli_config)
    }

    /// Run the selected command with an explicit [`CliConfig`].
    ///
    /// # Errors
    ///
    /// Returns the command's error for display by the caller.
    pub fn execute_with_config(self, cli_config: &CliConfig) -> Result<()> {
        match self.command {
            Commands::Files(cmd) => cmd.execute(),
            Commands::Ids(cmd) => cmd.execute(&cli_config.load_config()?),
            Commands::Render(cmd) => cmd.execute(&cli_config.load_config()?),
            Commands::Show(cmd) => cmd.execute(&cli_config.load_config()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_config_levels() {
        let cli = Cli::parse_from(["invoicegen", "--verbose", "files"]);
        assert_eq!(cli.build_config().log_level, "debug");

        let cli = Cli::parse_from(["invoicegen", "-q", "files"]);
        assert_eq!(cli.build_config().log_level, "error");

        let cli = Cli::parse_from(["invoicegen", "ids", "data.csv"]);
        assert_eq!(cli.build_config().log_level, "warn");
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["invoicegen", "-v", "-q", "files"]).is_err());
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::parse_from(["invoicegen", "--config", "/tmp/c.toml", "files"]);
        assert_eq!(cli.build_config().config_path, Some(PathBuf::from("/tmp/c.toml")));
    }
}

//! Configuration management for invoicegen.
//!
//! Settings live in a single TOML file. Nothing in it is required: an absent
//! file, or an absent key, falls back to built-in defaults.
//!
//! # Location
//!
//! - Unix/macOS: `~/.invoicegen/config.toml`
//! - Windows: `%LOCALAPPDATA%\invoicegen\config.toml`
//! - Override: `--config <PATH>` or the `INVOICEGEN_CONFIG` environment variable
//!
//! # Example
//!
//! ```rust,no_run
//! use invoicegen_cli::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::load_with_optional(None)?;
//! println!("Writing documents to {}", config.output_dir.display());
//! # Ok(())
//! # }
//! ```

mod settings;

pub use settings::{Config, EngineConfig, FontConfig, PageConfig};

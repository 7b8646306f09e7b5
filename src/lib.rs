//! invoicegen - render one record of a CSV/JSON file through an HTML template
//!
//! The crate turns a single selected record from a tabular or hierarchical
//! data file into a document. Records are normalized, keyed by an identifier
//! derived from well-known field names, substituted into an HTML template,
//! and handed to a document engine.
//!
//! # Architecture Overview
//!
//! ```text
//! data file ──► RecordLoader ──► IdentifierResolver ──► RecordIndex
//!                                                          │ identifier
//!                                                          ▼
//! template ─────────────────────► TemplateRenderer ◄── context
//!                                        │ HTML
//!                                        ▼
//!                                 DocumentEngine ──► PDF / HTML file
//! ```
//!
//! # Core Modules
//!
//! - [`records`] - Loading CSV/JSON, identifier resolution, the record index
//! - [`templating`] - `{{ dotted.path }}` substitution with HTML escaping
//! - [`pipeline`] - The end-to-end render of one record
//! - [`document`] - Stylesheet description and document engines
//!
//! ## Supporting Modules
//!
//! - [`core`] - Error types and user-facing error reporting
//! - [`config`] - The optional `config.toml`
//! - [`cli`] - Command-line interface
//! - [`constants`] - Ordered lists and defaults that drive behavior
//!
//! # Data Sources
//!
//! CSV files are decoded as UTF-8 (with or without BOM), then Windows-1251,
//! KOI8-R and CP866; the delimiter is sniffed. JSON files may be a list of
//! objects, an object wrapping such a list (`{"invoices": [...]}`), or an
//! object of objects keyed by identifier.
//!
//! # Example
//!
//! ```rust,no_run
//! use invoicegen_cli::config::Config;
//! use invoicegen_cli::pipeline::{RenderPipeline, RenderRequest};
//! use std::path::PathBuf;
//!
//! # fn example() -> anyhow::Result<()> {
//! let pipeline = RenderPipeline::new(&Config::default())?;
//! let outcome = pipeline.run(&RenderRequest {
//!     data: PathBuf::from("data/invoices.csv"),
//!     template: PathBuf::from("templates/invoice.html"),
//!     identifier: "INV-001".to_string(),
//!     output: None,
//! })?;
//! println!("Saved {}", outcome.output.display());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod document;
pub mod pipeline;
pub mod records;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

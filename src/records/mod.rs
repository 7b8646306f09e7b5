//! Record loading, identifier resolution, and lookup.
//!
//! A data file goes through three steps before anything is rendered:
//!
//! 1. [`RecordLoader`] reads a CSV or JSON file into an ordered list of
//!    [`Record`]s, remembering which [`SourceShape`] it recognized.
//! 2. [`IdentifierResolver`] derives an identifier for each record from a
//!    prioritized list of candidate field names.
//! 3. [`RecordIndex`] keys the records by identifier, assigning `AUTO-<n>`
//!    to records without one. Duplicate identifiers follow last-write-wins.
//!
//! # Example
//!
//! ```rust,no_run
//! use invoicegen_cli::records::{IdentifierResolver, RecordIndex, RecordLoader};
//! use std::path::Path;
//!
//! # fn example() -> invoicegen_cli::core::Result<()> {
//! let resolver = IdentifierResolver::default();
//! let loaded = RecordLoader::new(resolver.clone()).load(Path::new("data/invoices.csv"))?;
//! let index = RecordIndex::build(loaded.records, &resolver);
//! for id in index.list_identifiers() {
//!     println!("{id}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod csv_source;
pub mod encoding;
pub mod identifier;
pub mod index;
pub mod json_source;
pub mod loader;
pub mod record;

pub use encoding::TextEncoding;
pub use identifier::IdentifierResolver;
pub use index::RecordIndex;
pub use loader::{LoadedSource, RecordLoader, SourceKind, SourceShape};
pub use record::{Context, Record};

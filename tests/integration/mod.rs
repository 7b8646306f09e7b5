//! Integration test suite for invoicegen
//!
//! End-to-end tests for the library pipeline and the `invoicegen` binary.
//! Every test works in its own temporary directory and renders with the HTML
//! engine, so WeasyPrint is never required.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **loading**: CSV/JSON shapes, encodings, and identifier indexing
//! - **pipeline**: Library-level rendering through `RenderPipeline`
//! - **cli_files**: `invoicegen files`
//! - **cli_ids**: `invoicegen ids` and `invoicegen show`
//! - **cli_render**: `invoicegen render` and exit codes

mod common;

mod cli_files;
mod cli_ids;
mod cli_render;
mod loading;
mod pipeline;

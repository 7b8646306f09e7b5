//! `invoicegen show`: print one record.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::core::InvoiceError;
use crate::pipeline::RenderPipeline;

/// Print the record behind an identifier as pretty JSON.
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Data file (.csv or .json)
    data: PathBuf,

    /// Record identifier
    id: String,
}

impl ShowCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let pipeline = RenderPipeline::new(config)?;
        let index = pipeline.load_index(&self.data)?;
        let id = self.id.trim();
        let record = index.get(id).ok_or_else(|| InvoiceError::IdentifierNotFound {
            identifier: id.to_string(),
            suggestions: index.suggest(id),
        })?;

        let json = serde_json::to_string_pretty(record).context("Failed to serialize record")?;
        println!("{json}");
        Ok(())
    }
}

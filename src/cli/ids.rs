//! `invoicegen ids`: list record identifiers.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::pipeline::RenderPipeline;

/// List the identifiers of a data file.
#[derive(Args, Debug)]
pub struct IdsCommand {
    /// Data file (.csv or .json)
    data: PathBuf,
}

impl IdsCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let pipeline = RenderPipeline::new(config)?;
        let index = pipeline.load_index(&self.data)?;
        for id in index.list_identifiers() {
            println!("{id}");
        }
        Ok(())
    }
}

//! `invoicegen render`: render one record into a document.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;
use crate::core::InvoiceError;
use crate::document::EngineKind;
use crate::pipeline::{RenderPipeline, RenderRequest};

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// PDF through WeasyPrint
    Pdf,
    /// Standalone HTML with the stylesheet inlined
    Html,
}

impl From<OutputFormat> for EngineKind {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Pdf => Self::Weasyprint,
            OutputFormat::Html => Self::Html,
        }
    }
}

/// Render one record through a template.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Data file (.csv or .json)
    data: PathBuf,

    /// HTML template with {{ placeholders }}
    template: PathBuf,

    /// Identifier of the record to render
    id: String,

    /// Output file (default: <output_dir>/<id>.pdf or .html)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format, overriding `[engine] kind` from the config file
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Font file to embed, overriding `[fonts] file` from the config file
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,
}

impl RenderCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let mut config = config.clone();
        if let Some(format) = self.format {
            config.engine.kind = format.into();
        }
        if let Some(font) = self.font {
            if !font.is_file() {
                return Err(InvoiceError::ConfigError {
                    message: format!("Font file not found: {}", font.display()),
                }
                .into());
            }
            config.fonts.file = Some(font);
        }

        let pipeline = RenderPipeline::new(&config)?;
        let outcome = pipeline.run(&RenderRequest {
            data: self.data,
            template: self.template,
            identifier: self.id,
            output: self.output,
        })?;

        println!("{}", outcome.output.display());
        Ok(())
    }
}

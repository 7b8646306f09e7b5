//! End-to-end rendering of one record.
//!
//! [`RenderPipeline::run`] performs, in order:
//!
//! 1. load the data file ([`RecordLoader`]);
//! 2. build the identifier index, failing on an empty dataset;
//! 3. look up the requested identifier;
//! 4. assemble the render context (`invoice_id`, `generated_at` and the
//!    `table_content` dump are added only when the record does not already
//!    have them);
//! 5. substitute the template;
//! 6. hand the HTML and stylesheet to the document engine.
//!
//! Each step surfaces a typed [`InvoiceError`]; nothing is retried. The
//! pipeline is synchronous and keeps no state between runs.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;

use crate::config::Config;
use crate::constants::{
    FALLBACK_FILE_STEM, GENERATED_AT_FIELD, GENERATED_AT_FORMAT, IDENTIFIER_FIELD,
    TABLE_CONTENT_FIELD,
};
use crate::core::{InvoiceError, Result};
use crate::document::{DocumentEngine, Stylesheet, create_engine};
use crate::records::{Context, IdentifierResolver, Record, RecordIndex, RecordLoader};
use crate::templating::renderer::value_text;
use crate::templating::{Markup, TemplateRenderer, escape_html};

/// One render: which data, which template, which record, and where to.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Data file (CSV or JSON)
    pub data: PathBuf,
    /// HTML template
    pub template: PathBuf,
    /// Identifier of the record to render
    pub identifier: String,
    /// Output file; defaults to `<output_dir>/<safe identifier>.<ext>`
    pub output: Option<PathBuf>,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Written document
    pub output: PathBuf,
    /// Identifier that was rendered
    pub identifier: String,
    /// Engine that wrote the document
    pub engine: String,
    /// Placeholders that resolved to nothing
    pub unresolved: Vec<String>,
}

/// Wires loader, resolver, renderer, and document engine together.
pub struct RenderPipeline {
    resolver: IdentifierResolver,
    loader: RecordLoader,
    renderer: TemplateRenderer,
    stylesheet: Stylesheet,
    engine: Box<dyn DocumentEngine>,
    output_dir: PathBuf,
}

impl std::fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPipeline")
            .field("resolver", &self.resolver)
            .field("stylesheet", &self.stylesheet)
            .field("engine", &self.engine.name())
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl RenderPipeline {
    /// Pipeline configured from `config`.
    ///
    /// # Errors
    ///
    /// Fails only if the template renderer cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let resolver = config.resolver();
        Ok(Self {
            loader: RecordLoader::new(resolver.clone()),
            resolver,
            renderer: TemplateRenderer::new()?,
            stylesheet: config.stylesheet(),
            engine: create_engine(config.engine.kind, &config.engine.program),
            output_dir: config.output_dir.clone(),
        })
    }

    /// Replace the document engine.
    #[must_use]
    pub fn with_engine(mut self, engine: Box<dyn DocumentEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the stylesheet.
    #[must_use]
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Stylesheet handed to the engine.
    #[must_use]
    pub const fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Name of the active engine.
    #[must_use]
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Load `data` and index its records.
    ///
    /// # Errors
    ///
    /// Loader errors pass through unchanged. A file without records gives
    /// [`InvoiceError::EmptyDataset`].
    pub fn load_index(&self, data: &Path) -> Result<RecordIndex> {
        let loaded = self.loader.load(data)?;
        if loaded.records.is_empty() {
            return Err(InvoiceError::EmptyDataset {
                file: data.display().to_string(),
            });
        }

        let index = RecordIndex::build(loaded.records, &self.resolver);
        if !index.overwritten().is_empty() {
            tracing::warn!(
                "{} record(s) in {} were hidden by later records with the same identifier",
                index.overwritten().len(),
                data.display()
            );
        }
        Ok(index)
    }

    /// Render the template at `template` for `identifier`.
    ///
    /// # Errors
    ///
    /// - [`InvoiceError::IdentifierNotFound`] (with suggestions) if the
    ///   identifier is not indexed
    /// - [`InvoiceError::TemplateNotFound`] if the template does not exist
    /// - [`InvoiceError::FormatError`] if the template is not UTF-8
    pub fn render_html(
        &self,
        index: &RecordIndex,
        template: &Path,
        identifier: &str,
        generated_at: &str,
    ) -> Result<String> {
        self.render_with_report(index, template, identifier, generated_at).map(|(html, _)| html)
    }

    fn render_with_report(
        &self,
        index: &RecordIndex,
        template: &Path,
        identifier: &str,
        generated_at: &str,
    ) -> Result<(String, Vec<String>)> {
        let identifier = identifier.trim();
        let record = index.get(identifier).ok_or_else(|| InvoiceError::IdentifierNotFound {
            identifier: identifier.to_string(),
            suggestions: index.suggest(identifier),
        })?;

        let template_text = read_template(template)?;
        let context = assemble_context(record, identifier, generated_at);
        let markup = Markup::from([(TABLE_CONTENT_FIELD.to_string(), record_table(record))]);

        let unresolved = self.renderer.unresolved_with_markup(&template_text, &context, &markup);
        if !unresolved.is_empty() {
            tracing::warn!(
                "Template {} has placeholders with no value: {}",
                template.display(),
                unresolved.join(", ")
            );
        }
        Ok((self.renderer.render_with_markup(&template_text, &context, &markup), unresolved))
    }

    /// Default output location for `identifier`.
    #[must_use]
    pub fn default_output_path(&self, identifier: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", safe_filename(identifier), self.engine.extension()))
    }

    /// Run all steps for `request`.
    ///
    /// # Errors
    ///
    /// Any error of [`RenderPipeline::load_index`] or
    /// [`RenderPipeline::render_html`], an I/O error creating the output
    /// directory, or the engine's [`InvoiceError::RenderError`].
    pub fn run(&self, request: &RenderRequest) -> Result<RenderOutcome> {
        let index = self.load_index(&request.data)?;
        let identifier = request.identifier.trim();
        let generated_at = Local::now().format(GENERATED_AT_FORMAT).to_string();
        let (html, unresolved) =
            self.render_with_report(&index, &request.template, identifier, &generated_at)?;

        let output =
            request.output.clone().unwrap_or_else(|| self.default_output_path(identifier));
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(
            "Rendering '{}' with {} to {}",
            identifier,
            self.engine.name(),
            output.display()
        );
        let base_dir = request.template.parent().filter(|p| !p.as_os_str().is_empty());
        self.engine.render(&html, &self.stylesheet, base_dir, &output)?;

        Ok(RenderOutcome {
            output,
            identifier: identifier.to_string(),
            engine: self.engine.name().to_string(),
            unresolved,
        })
    }
}

/// Context for rendering `record` as `identifier`.
///
/// Record fields always win: `invoice_id` and `generated_at` only fill gaps.
/// The `table_content` default is supplied at render time as markup.
#[must_use]
pub fn assemble_context(record: &Record, identifier: &str, generated_at: &str) -> Context {
    let mut context = record.to_context();
    context
        .entry(IDENTIFIER_FIELD)
        .or_insert_with(|| Value::String(identifier.to_string()));
    context
        .entry(GENERATED_AT_FIELD)
        .or_insert_with(|| Value::String(generated_at.to_string()));
    context
}

/// HTML table of every field of `record`: one header row of field names and
/// one row of values, both escaped. Empty values (`null`, `nan`) give empty
/// cells and nested values their JSON text.
#[must_use]
pub fn record_table(record: &Record) -> String {
    let mut table = String::from("<table>\n<thead>\n<tr>\n");
    for name in record.field_names() {
        table.push_str(&format!("    <th>{}</th>\n", escape_html(name)));
    }
    table.push_str("</tr>\n</thead>\n<tbody>\n<tr>\n");
    for (_, value) in record.iter() {
        let text = value_text(value).unwrap_or_default();
        table.push_str(&format!("    <td>{}</td>\n", escape_html(&text)));
    }
    table.push_str("</tr>\n</tbody>\n</table>\n");
    table
}

/// File name stem for `identifier`: runs of characters outside
/// `[A-Za-z0-9._-]` become `_`; an empty result becomes `invoice`.
#[must_use]
pub fn safe_filename(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut in_run = false;
    for ch in identifier.trim().chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            out.push(ch);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    if out.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        out
    }
}

fn read_template(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(InvoiceError::TemplateNotFound {
            path: path.display().to_string(),
        });
    }
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| {
        InvoiceError::format(path.display(), format!("template is not valid UTF-8: {e}"))
    })?;
    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

//! Hand-off from rendered HTML to an output document.
//!
//! Two engines ship with the crate: [`WeasyPrintEngine`] produces PDF through
//! the external `weasyprint` tool, [`HtmlEngine`] writes the styled HTML
//! itself. Font discovery is not done here; a font file is only embedded when
//! the caller configures one on the [`Stylesheet`].

pub mod engine;
pub mod stylesheet;

use serde::{Deserialize, Serialize};

pub use engine::{DocumentEngine, HtmlEngine, WeasyPrintEngine};
pub use stylesheet::Stylesheet;

/// Engine selection as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// PDF via `weasyprint`
    #[default]
    Weasyprint,
    /// Standalone HTML
    Html,
}

/// Build the engine for `kind`. `program` only applies to
/// [`EngineKind::Weasyprint`].
#[must_use]
pub fn create_engine(kind: EngineKind, program: &str) -> Box<dyn DocumentEngine> {
    match kind {
        EngineKind::Weasyprint => Box::new(WeasyPrintEngine::new(program)),
        EngineKind::Html => Box::new(HtmlEngine),
    }
}

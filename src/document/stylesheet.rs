//! Page and font description handed to document engines.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use url::Url;

use crate::constants::{
    DEFAULT_FONT_FAMILIES, DEFAULT_PAGE_MARGIN, DEFAULT_PAGE_SIZE, EMBEDDED_FONT_FAMILY,
};

/// Minimal stylesheet: page geometry plus a font preference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    /// CSS `@page` size, e.g. `A4` or `letter landscape`
    pub page_size: String,
    /// CSS `@page` margin
    pub margin: String,
    /// Font families in preference order
    pub font_families: Vec<String>,
    /// Font file embedded via `@font-face` and tried before `font_families`
    pub font_file: Option<PathBuf>,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.to_string(),
            margin: DEFAULT_PAGE_MARGIN.to_string(),
            font_families: DEFAULT_FONT_FAMILIES.iter().map(|f| (*f).to_string()).collect(),
            font_file: None,
        }
    }
}

impl Stylesheet {
    /// Replace the embedded font file.
    #[must_use]
    pub fn with_font_file(mut self, font_file: Option<PathBuf>) -> Self {
        self.font_file = font_file;
        self
    }

    /// Render as CSS.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let mut families = Vec::with_capacity(self.font_families.len() + 1);

        if let Some(font) = &self.font_file {
            if let Some(uri) = file_uri(font) {
                let _ = write!(
                    css,
                    "@font-face {{\n  font-family: \"{EMBEDDED_FONT_FAMILY}\";\n  \
                     src: url(\"{uri}\");\n}}\n"
                );
                families.push(quote_family(EMBEDDED_FONT_FAMILY));
            } else {
                tracing::warn!("Cannot build a file URI for font {}, skipping it", font.display());
            }
        }
        families.extend(self.font_families.iter().map(|f| quote_family(f)));

        let _ = write!(
            css,
            "html, body {{\n  font-family: {};\n  font-size: 12pt;\n  color: #111;\n}}\n",
            families.join(", ")
        );
        let _ = write!(
            css,
            "@page {{\n  size: {};\n  margin: {};\n}}\n",
            self.page_size, self.margin
        );
        css
    }
}

/// Quote a family name unless it is a plain CSS identifier.
fn quote_family(family: &str) -> String {
    if family.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        family.to_string()
    } else {
        format!("\"{}\"", family.replace('"', "\\\""))
    }
}

/// Percent-encoded `file://` URI for `path`, made absolute against the
/// current directory.
///
/// `None` when the path cannot be made absolute or has no URI form.
#[must_use]
pub fn file_uri(path: &Path) -> Option<String> {
    let absolute = std::path::absolute(path).ok()?;
    Url::from_file_path(absolute).ok().map(String::from)
}

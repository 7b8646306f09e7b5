//! Document engines turning finished HTML into an output file.
//!
//! The engine is an external collaborator: it receives complete HTML plus a
//! [`Stylesheet`] and either produces the file or fails with
//! [`InvoiceError::RenderError`]. Failures are reported, never retried.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::stylesheet::Stylesheet;
use crate::constants::DEFAULT_ENGINE_PROGRAM;
use crate::core::{InvoiceError, Result};

/// Converts HTML to a document file.
pub trait DocumentEngine {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Extension (without dot) of the files this engine writes.
    fn extension(&self) -> &str;

    /// Render `html` styled by `stylesheet` into `output`.
    ///
    /// `base_dir` resolves relative URLs inside the HTML. The parent of
    /// `output` must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::RenderError`] when the document cannot be
    /// produced.
    fn render(
        &self,
        html: &str,
        stylesheet: &Stylesheet,
        base_dir: Option<&Path>,
        output: &Path,
    ) -> Result<()>;
}

/// Renders PDF by running the `weasyprint` command line tool.
#[derive(Debug, Clone)]
pub struct WeasyPrintEngine {
    program: String,
}

impl Default for WeasyPrintEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_PROGRAM)
    }
}

impl WeasyPrintEngine {
    /// Engine running `program` (a name looked up on `PATH`, or a path).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> InvoiceError {
        InvoiceError::RenderError {
            engine: self.name().to_string(),
            reason: reason.into(),
        }
    }

    fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|e| {
            self.error(format!(
                "'{}' was not found ({e}); install WeasyPrint or render with --format html",
                self.program
            ))
        })
    }
}

impl DocumentEngine for WeasyPrintEngine {
    fn name(&self) -> &str {
        "weasyprint"
    }

    fn extension(&self) -> &str {
        "pdf"
    }

    fn render(
        &self,
        html: &str,
        stylesheet: &Stylesheet,
        base_dir: Option<&Path>,
        output: &Path,
    ) -> Result<()> {
        let program = self.locate()?;

        let mut css_file =
            tempfile::Builder::new().prefix("invoicegen-").suffix(".css").tempfile()?;
        css_file.write_all(stylesheet.to_css().as_bytes())?;
        css_file.flush()?;

        let mut cmd = Command::new(&program);
        cmd.arg("-s").arg(css_file.path());
        if let Some(base) = base_dir {
            cmd.arg("-u").arg(base);
        }
        cmd.arg("-").arg(output);
        cmd.stdin(Stdio::piped()).stdout(Stdio::null()).stderr(Stdio::piped());

        tracing::debug!("Executing command: {:?}", cmd);

        let mut child = cmd
            .spawn()
            .map_err(|e| self.error(format!("failed to start {}: {e}", program.display())))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(html.as_bytes())
                .map_err(|e| self.error(format!("failed to send HTML: {e}")))?;
        }
        let result = child
            .wait_with_output()
            .map_err(|e| self.error(format!("failed to wait for {}: {e}", program.display())))?;

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !result.status.success() {
            let reason = if stderr.trim().is_empty() {
                format!("exited with {}", result.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(self.error(reason));
        }
        if !stderr.trim().is_empty() {
            tracing::debug!("weasyprint: {}", stderr.trim());
        }
        Ok(())
    }
}

/// Writes a standalone HTML file with the stylesheet inlined.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEngine;

impl HtmlEngine {
    /// `html` with a `<style>` element holding `css`, placed at the end of
    /// `<head>` or at the very start when there is no head.
    #[must_use]
    pub fn inline_stylesheet(html: &str, css: &str) -> String {
        let style = format!("<style>\n{css}</style>\n");
        // ASCII lowercasing keeps byte offsets intact
        match html.to_ascii_lowercase().find("</head>") {
            Some(pos) => format!("{}{style}{}", &html[..pos], &html[pos..]),
            None => format!("{style}{html}"),
        }
    }
}

impl DocumentEngine for HtmlEngine {
    fn name(&self) -> &str {
        "html"
    }

    fn extension(&self) -> &str {
        "html"
    }

    fn render(
        &self,
        html: &str,
        stylesheet: &Stylesheet,
        _base_dir: Option<&Path>,
        output: &Path,
    ) -> Result<()> {
        let document = Self::inline_stylesheet(html, &stylesheet.to_css());
        std::fs::write(output, document).map_err(|e| InvoiceError::RenderError {
            engine: self.name().to_string(),
            reason: format!("failed to write {}: {e}", output.display()),
        })
    }
}

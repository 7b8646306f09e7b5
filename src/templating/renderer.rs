//! Placeholder substitution.
//!
//! A placeholder is `{{ dotted.path }}`: braces, optional whitespace, one or
//! more letters, digits, `_`, `-` or `.`, optional whitespace, braces. Each
//! segment of the path is looked up in the nested mapping reached by the
//! previous one. Anything that does not match the grammar is copied through
//! untouched.

use std::collections::BTreeMap;

use regex::{Captures, Regex};
use serde_json::Value;

use super::escape::escape_html;
use crate::constants::NAN_SENTINEL;
use crate::core::{InvoiceError, Result};
use crate::records::Context;

const TOKEN_PATTERN: &str = r"\{\{\s*([\p{L}\p{N}_.\-]+)\s*\}\}";

/// Ready-made HTML fragments keyed by placeholder path, substituted verbatim
/// when the context has no value at that path.
pub type Markup = BTreeMap<String, String>;

/// Renders templates against a [`Context`].
///
/// Rendering is a pure function of template and context. Substituted text is
/// never scanned again, so data values cannot introduce new placeholders.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    token: Regex,
}

impl TemplateRenderer {
    /// Compile the placeholder grammar.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::Other`] if the placeholder pattern fails to
    /// compile, which only happens when the regex engine lacks Unicode tables.
    pub fn new() -> Result<Self> {
        let token = Regex::new(TOKEN_PATTERN).map_err(|e| InvoiceError::Other {
            message: format!("Failed to compile placeholder pattern: {e}"),
        })?;
        Ok(Self {
            token,
        })
    }

    /// Substitute every placeholder in `template`.
    ///
    /// Missing paths, `null`, and the `nan` sentinel render as an empty
    /// string. Everything else is converted to text and HTML-escaped.
    #[must_use]
    pub fn render(&self, template: &str, context: &Context) -> String {
        self.render_with_markup(template, context, &Markup::new())
    }

    /// Like [`TemplateRenderer::render`], with `markup` filling the paths the
    /// context does not have. Markup is inserted as-is, without escaping.
    #[must_use]
    pub fn render_with_markup(
        &self,
        template: &str,
        context: &Context,
        markup: &Markup,
    ) -> String {
        self.token
            .replace_all(template, |caps: &Captures<'_>| {
                let path = &caps[1];
                match lookup(context, path) {
                    Some(value) => value_text(value).map(|t| escape_html(&t)).unwrap_or_default(),
                    None => markup.get(path).cloned().unwrap_or_default(),
                }
            })
            .into_owned()
    }

    /// Distinct placeholder paths in order of first appearance.
    #[must_use]
    pub fn placeholders(&self, template: &str) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for caps in self.token.captures_iter(template) {
            let path = &caps[1];
            if !paths.iter().any(|p| p == path) {
                paths.push(path.to_string());
            }
        }
        paths
    }

    /// Placeholder paths that do not resolve against `context`.
    ///
    /// Paths that resolve to `null` or `nan` are not listed: they are present,
    /// just empty.
    #[must_use]
    pub fn unresolved(&self, template: &str, context: &Context) -> Vec<String> {
        self.unresolved_with_markup(template, context, &Markup::new())
    }

    /// Placeholder paths found in neither `context` nor `markup`.
    #[must_use]
    pub fn unresolved_with_markup(
        &self,
        template: &str,
        context: &Context,
        markup: &Markup,
    ) -> Vec<String> {
        self.placeholders(template)
            .into_iter()
            .filter(|path| lookup(context, path).is_none() && !markup.contains_key(path))
            .collect()
    }
}

/// Follow a dotted `path` through nested objects.
///
/// Returns `None` as soon as a segment is missing or an intermediate value is
/// not an object.
#[must_use]
pub fn lookup<'a>(context: &'a Context, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = context.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Text substituted for `value`, before escaping.
///
/// `None` for `null` and for text equal to `nan` (any case, no trimming).
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    };
    if text.eq_ignore_ascii_case(NAN_SENTINEL) {
        None
    } else {
        Some(text)
    }
}

//! HTML template substitution.
//!
//! Templates are plain HTML with `{{ dotted.path }}` placeholders. There is no
//! template logic: no conditionals, loops, filters, or includes. A placeholder
//! either resolves to a value from the render context, which is HTML-escaped,
//! or renders as an empty string.
//!
//! ```rust
//! use invoicegen_cli::templating::TemplateRenderer;
//! use serde_json::json;
//!
//! # fn example() -> invoicegen_cli::core::Result<()> {
//! let renderer = TemplateRenderer::new()?;
//! let context = json!({"customer": {"name": "Smith & Sons"}});
//! let html = renderer.render("<p>{{ customer.name }}</p>", context.as_object().unwrap());
//! assert_eq!(html, "<p>Smith &amp; Sons</p>");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod escape;
pub mod renderer;

pub use escape::{escape_html, unescape_html};
pub use renderer::{Markup, TemplateRenderer};

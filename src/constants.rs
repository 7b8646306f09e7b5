//! Global constants used throughout the invoicegen codebase.
//!
//! The ordered lists here drive behavior directly (identifier lookup, JSON
//! unwrapping, CSV sniffing). They are data rather than control flow so
//! they can be tested and overridden on their own.

/// Field names tried, in order, when deriving a record identifier.
///
/// Matching is case-insensitive. Override with `identifier_fields` in the
/// config file.
pub const DEFAULT_IDENTIFIER_FIELDS: &[&str] = &[
    "invoice_id",
    "invoiceId",
    "invoice-id",
    "invoice id",
    "invoice",
    "invoice_number",
    "invoiceNumber",
    "id",
    "номер",
    "номер_счета",
    "счет",
    "check_id",
    "checkId",
    "check-id",
];

/// Field injected into dictionary-shaped JSON records that carry no identifier,
/// and into the render context when the record lacks it.
pub const IDENTIFIER_FIELD: &str = "invoice_id";

/// Context field holding the render timestamp.
pub const GENERATED_AT_FIELD: &str = "generated_at";

/// Context field holding an HTML table of every record field. Inserted as
/// markup, so the renderer does not escape it again.
pub const TABLE_CONTENT_FIELD: &str = "table_content";

/// `chrono` format of [`GENERATED_AT_FIELD`].
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefix of identifiers assigned to records without one.
pub const AUTO_ID_PREFIX: &str = "AUTO-";

/// Placeholder some tabular engines emit for missing numbers. Compared
/// case-insensitively and treated as "no value".
pub const NAN_SENTINEL: &str = "nan";

/// Top-level JSON keys that conventionally wrap the record list.
pub const WRAPPING_KEYS: &[&str] = &["invoices", "items", "records", "data", "rows", "results"];

/// Delimiters considered by the CSV sniffer, in preference order.
pub const CSV_DELIMITER_CANDIDATES: &[u8] = b",;\t|";

/// Number of characters of decoded text inspected by the delimiter sniffer.
pub const CSV_SNIFF_SAMPLE_CHARS: usize = 1024;

/// Data file extensions accepted by the loader.
pub const TABULAR_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// JSON data file extensions accepted by the loader.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Data file extensions listed by `invoicegen files`.
pub const LISTED_DATA_EXTENSIONS: &[&str] = &["csv", "json"];

/// Template extensions listed by `invoicegen files`.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["html", "htm"];

/// File name used when an identifier sanitizes to nothing.
pub const FALLBACK_FILE_STEM: &str = "invoice";

/// Font family name bound to a configured font file via `@font-face`.
pub const EMBEDDED_FONT_FAMILY: &str = "InvoiceFont";

/// Default font-family preference list handed to the document engine.
pub const DEFAULT_FONT_FAMILIES: &[&str] =
    &["DejaVu Sans", "Roboto", "Segoe UI", "Arial", "sans-serif"];

/// Default CSS page size.
pub const DEFAULT_PAGE_SIZE: &str = "A4";

/// Default CSS page margin.
pub const DEFAULT_PAGE_MARGIN: &str = "12mm";

/// Executable name of the default document engine.
pub const DEFAULT_ENGINE_PROGRAM: &str = "weasyprint";

/// Default directory scanned for data files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default directory scanned for templates.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Maximum number of "did you mean" identifiers in a not-found error.
pub const MAX_IDENTIFIER_SUGGESTIONS: usize = 3;

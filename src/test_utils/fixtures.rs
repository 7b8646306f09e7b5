//! Sample data files and templates.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A data file to write into a test directory.
#[derive(Clone, Debug)]
pub struct DataFixture {
    pub name: String,
    pub content: Vec<u8>,
}

impl DataFixture {
    /// Fixture with arbitrary content.
    pub fn new(name: &str, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            content: content.into(),
        }
    }

    /// Comma-separated UTF-8 CSV with three invoices.
    pub fn csv_basic() -> Self {
        Self::new(
            "invoices.csv",
            concat!(
                "invoice_id,customer,total\n",
                "INV-001,Acme & Co,100\n",
                "INV-002,Globex,250.50\n",
                "INV-003,\"Initech, LLC\",75\n",
            ),
        )
    }

    /// Semicolon CSV with decimal commas and a BOM, as spreadsheet exports produce.
    pub fn csv_semicolon_bom() -> Self {
        let mut content = b"\xEF\xBB\xBF".to_vec();
        content.extend_from_slice(
            "Номер;Клиент;Сумма\n17;Иванов;1200,50\n18;Петров;99,00\n".as_bytes(),
        );
        Self::new("checks.csv", content)
    }

    /// Windows-1251 encoded CSV.
    pub fn csv_windows_1251() -> Self {
        let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode("номер;клиент\n5;Сидоров\n");
        Self::new("legacy.csv", bytes.into_owned())
    }

    /// CSV where two rows share an identifier and one row has none.
    pub fn csv_duplicates() -> Self {
        Self::new("dups.csv", "id,amount\nA,5\nA,9\n,1\n")
    }

    /// Header-only CSV.
    pub fn csv_header_only() -> Self {
        Self::new("empty.csv", "invoice_id,total\n")
    }

    /// JSON list of objects with a nested customer.
    pub fn json_list() -> Self {
        Self::new(
            "invoices.json",
            r#"[
  {"invoice_id": "INV-100", "customer": {"name": "Иванов", "city": "<Moscow>"}, "total": 42},
  {"invoice_id": "INV-101", "customer": null, "total": "NaN"}
]"#,
        )
    }

    /// JSON object wrapping the list under `items`.
    pub fn json_wrapped() -> Self {
        Self::new("wrapped.json", r#"{"items": [{"invoice": "Z1", "total": 100}]}"#)
    }

    /// JSON object of objects keyed by identifier.
    pub fn json_dict() -> Self {
        Self::new(
            "dict.json",
            r#"{"K-1": {"total": 10}, "K-2": {"id": "OWN-2", "total": 20}}"#,
        )
    }

    /// JSON that matches no supported shape.
    pub fn json_unsupported() -> Self {
        Self::new("scalar.json", "42")
    }

    /// Truncated JSON.
    pub fn json_invalid() -> Self {
        Self::new("broken.json", "[{\"id\": 1,")
    }

    /// Write the fixture into `dir`, returning its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}

/// An HTML template to write into a test directory.
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    pub name: String,
    pub content: String,
}

impl TemplateFixture {
    /// Fixture with arbitrary content.
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    /// Invoice template using flat fields.
    pub fn invoice() -> Self {
        Self::new(
            "invoice.html",
            "<html><head><title>{{ invoice_id }}</title></head>\
             <body><h1>Invoice {{ invoice_id }}</h1><p>{{customer}}</p><p>Total: {{ total }}</p>\
             <p>{{ generated_at }}</p></body></html>",
        )
    }

    /// Template using dotted paths into a nested customer.
    pub fn nested() -> Self {
        Self::new(
            "nested.html",
            "<p>{{ customer.name }} / {{ customer.city }} / {{ total }}</p>",
        )
    }

    /// Write the fixture into `dir`, returning its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write template {}", path.display()))?;
        Ok(path)
    }
}

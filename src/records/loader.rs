//! Loading records from data files.
//!
//! [`RecordLoader::load`] dispatches on the file extension, decodes the
//! content, and reports the [`SourceShape`] it recognized alongside the
//! records. Loading never writes anything.

use std::fmt;
use std::path::Path;

use super::csv_source;
use super::encoding::{TextEncoding, decode_text};
use super::identifier::IdentifierResolver;
use super::json_source;
use super::record::Record;
use crate::constants::{JSON_EXTENSIONS, TABULAR_EXTENSIONS};
use crate::core::{InvoiceError, Result};

/// The recognized layout of a data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceShape {
    /// Delimited text with a header row
    Tabular {
        /// Field delimiter that was sniffed
        delimiter: u8,
        /// Encoding the text decoded with
        encoding: TextEncoding,
    },
    /// JSON array of objects
    List,
    /// JSON object holding the array of objects under `key`
    WrappedList {
        /// Field holding the records
        key: String,
    },
    /// JSON object whose values are objects keyed by external identifier
    DictOfObjects,
}

impl fmt::Display for SourceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabular {
                delimiter,
                encoding,
            } => write!(f, "CSV ({encoding}, delimiter {:?})", *delimiter as char),
            Self::List => write!(f, "JSON list"),
            Self::WrappedList {
                key,
            } => write!(f, "JSON list under '{key}'"),
            Self::DictOfObjects => write!(f, "JSON object of objects"),
        }
    }
}

/// Records read from one file, with the shape they were read as.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    /// Recognized layout
    pub shape: SourceShape,
    /// Records in source order
    pub records: Vec<Record>,
}

/// Which decoder a file extension selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// CSV and friends
    Tabular,
    /// JSON
    Json,
}

impl SourceKind {
    /// Kind selected by the extension of `path`, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if TABULAR_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Tabular)
        } else if JSON_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Reads CSV and JSON data files into [`Record`]s.
#[derive(Debug, Clone, Default)]
pub struct RecordLoader {
    resolver: IdentifierResolver,
}

impl RecordLoader {
    /// Loader using `resolver` to decide whether dictionary-shaped JSON
    /// records already carry an identifier.
    #[must_use]
    pub const fn new(resolver: IdentifierResolver) -> Self {
        Self {
            resolver,
        }
    }

    /// Load every record of `path`.
    ///
    /// # Errors
    ///
    /// - [`InvoiceError::DataFileNotFound`] if `path` does not exist
    /// - [`InvoiceError::DataReadError`] if `path` exists but cannot be read
    /// - [`InvoiceError::FormatError`] for an unsupported extension, an
    ///   undecodable file, malformed content, or an unrecognized JSON shape
    pub fn load(&self, path: &Path) -> Result<LoadedSource> {
        if !path.exists() {
            return Err(InvoiceError::DataFileNotFound {
                path: path.display().to_string(),
            });
        }

        let kind = SourceKind::from_path(path).ok_or_else(|| {
            InvoiceError::format(
                path.display(),
                format!(
                    "unsupported file extension; expected one of: {}",
                    TABULAR_EXTENSIONS
                        .iter()
                        .chain(JSON_EXTENSIONS)
                        .map(|e| format!(".{e}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )
        })?;

        let bytes = std::fs::read(path).map_err(|e| InvoiceError::DataReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let loaded = match kind {
            SourceKind::Tabular => Self::load_tabular(&bytes),
            SourceKind::Json => self.load_json(&bytes),
        }
        .map_err(|reason| InvoiceError::format(path.display(), reason))?;

        tracing::info!(
            "Loaded {} records from {} as {}",
            loaded.records.len(),
            path.display(),
            loaded.shape
        );
        Ok(loaded)
    }

    /// Decode tabular bytes (encoding fallback, delimiter sniffing).
    ///
    /// # Errors
    ///
    /// Returns the reason when no encoding fits or the CSV is malformed.
    pub fn load_tabular(bytes: &[u8]) -> std::result::Result<LoadedSource, String> {
        let (encoding, text) = decode_text(bytes).ok_or_else(|| {
            "could not decode the file as UTF-8, Windows-1251, KOI8-R or CP866".to_string()
        })?;
        tracing::debug!("Decoded tabular source as {}", encoding);

        let (delimiter, records) = csv_source::parse_text(&text)?;
        Ok(LoadedSource {
            shape: SourceShape::Tabular {
                delimiter,
                encoding,
            },
            records,
        })
    }

    /// Decode JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the reason for invalid JSON or an unsupported document shape.
    pub fn load_json(&self, bytes: &[u8]) -> std::result::Result<LoadedSource, String> {
        let (shape, records) = json_source::parse_bytes(bytes, &self.resolver)?;
        tracing::debug!("Detected JSON shape: {}", shape);
        Ok(LoadedSource {
            shape,
            records,
        })
    }
}

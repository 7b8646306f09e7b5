//! User configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_ENGINE_PROGRAM, DEFAULT_FONT_FAMILIES, DEFAULT_IDENTIFIER_FIELDS, DEFAULT_PAGE_MARGIN,
    DEFAULT_PAGE_SIZE,
};
use crate::core::InvoiceError;
use crate::document::{EngineKind, Stylesheet};
use crate::records::IdentifierResolver;

/// Settings read from `config.toml`.
///
/// Every field is optional in the file; missing ones take the defaults
/// shown below.
///
/// ```toml
/// identifier_fields = ["invoice_id", "id"]
/// output_dir = "output"
///
/// [page]
/// size = "A4"
/// margin = "12mm"
///
/// [fonts]
/// families = ["DejaVu Sans", "Arial", "sans-serif"]
/// file = "fonts/DejaVuSans.ttf"
///
/// [engine]
/// kind = "weasyprint"
/// program = "weasyprint"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Candidate identifier fields in priority order.
    pub identifier_fields: Vec<String>,

    /// Directory receiving rendered documents when no output path is given.
    pub output_dir: PathBuf,

    /// Page geometry.
    pub page: PageConfig,

    /// Font preferences.
    pub fonts: FontConfig,

    /// Document engine.
    pub engine: EngineConfig,
}

/// `[page]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// CSS page size
    pub size: String,
    /// CSS page margin
    pub margin: String,
}

/// `[fonts]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font families in preference order
    pub families: Vec<String>,
    /// Font file to embed, relative paths resolve against the working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// `[engine]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which engine renders documents
    pub kind: EngineKind,
    /// Executable for [`EngineKind::Weasyprint`]
    pub program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identifier_fields: DEFAULT_IDENTIFIER_FIELDS.iter().map(|f| (*f).to_string()).collect(),
            output_dir: PathBuf::from("output"),
            page: PageConfig::default(),
            fonts: FontConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_PAGE_SIZE.to_string(),
            margin: DEFAULT_PAGE_MARGIN.to_string(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            families: DEFAULT_FONT_FAMILIES.iter().map(|f| (*f).to_string()).collect(),
            file: None,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            program: DEFAULT_ENGINE_PROGRAM.to_string(),
        }
    }
}

impl Config {
    /// Load from `path` if given, otherwise from [`Config::default_path`].
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!("No default config location: {}", e);
                    return Ok(Self::default());
                }
            },
        };
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`Config::validate`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot
    /// be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Platform default location.
    ///
    /// - **Windows**: `%LOCALAPPDATA%\invoicegen\config.toml`
    /// - **Unix/macOS**: `~/.invoicegen/config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("invoicegen")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".invoicegen")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Reject settings no run could succeed with.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::ConfigError`] for blank identifier fields or
    /// an empty page size, margin, or engine program.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        let invalid = |message: String| -> Result<(), InvoiceError> {
            Err(InvoiceError::ConfigError {
                message,
            })
        };

        if self.identifier_fields.iter().any(|f| f.trim().is_empty()) {
            return invalid("identifier_fields must not contain blank names".to_string());
        }
        if self.page.size.trim().is_empty() {
            return invalid("page.size must not be empty".to_string());
        }
        if self.page.margin.trim().is_empty() {
            return invalid("page.margin must not be empty".to_string());
        }
        if self.engine.kind == EngineKind::Weasyprint && self.engine.program.trim().is_empty() {
            return invalid("engine.program must not be empty".to_string());
        }
        Ok(())
    }

    /// Identifier resolver for the configured fields; the built-in list
    /// when none are configured.
    #[must_use]
    pub fn resolver(&self) -> IdentifierResolver {
        if self.identifier_fields.is_empty() {
            IdentifierResolver::default()
        } else {
            IdentifierResolver::new(self.identifier_fields.iter().cloned())
        }
    }

    /// Stylesheet for the configured page and fonts.
    ///
    /// A configured font file that does not exist is dropped with a warning
    /// and the named families are used instead.
    #[must_use]
    pub fn stylesheet(&self) -> Stylesheet {
        let font_file = self.fonts.file.clone().filter(|file| {
            let exists = file.is_file();
            if !exists {
                tracing::warn!(
                    "Font file {} not found; falling back to system fonts",
                    file.display()
                );
            }
            exists
        });

        Stylesheet {
            page_size: self.page.size.clone(),
            margin: self.page.margin.clone(),
            font_families: self.fonts.families.clone(),
            font_file,
        }
    }
}

//! Error handling for invoicegen
//!
//! This module provides the error taxonomy of the rendering core and the
//! user-facing reporting layer used by the CLI. The design follows two rules:
//! 1. **Strongly-typed errors** so callers can branch on the failure kind
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`InvoiceError`] - Enumerated error types for every structural failure
//! - [`ErrorContext`] - Wrapper that adds a suggestion and details for display
//!
//! # Error Categories
//!
//! - **Not found**: [`InvoiceError::DataFileNotFound`], [`InvoiceError::TemplateNotFound`],
//!   [`InvoiceError::IdentifierNotFound`], [`InvoiceError::NoInputFiles`]
//! - **Read**: [`InvoiceError::DataReadError`] when an existing data file cannot be read
//! - **Format**: [`InvoiceError::FormatError`] for undecodable or unrecognized content
//! - **Dataset**: [`InvoiceError::EmptyDataset`] when a file yields zero records
//! - **Rendering**: [`InvoiceError::RenderError`] for document engine failures
//!
//! Expected irregularities (a record without an identifier, an unresolved
//! placeholder, one failed encoding attempt) never surface here. They are
//! handled where they occur and reported through `tracing`.
//!
//! # Exit Codes
//!
//! [`InvoiceError::exit_code`] maps every variant onto the process exit code
//! consumed by the binary:
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! | 0    | success                 |
//! | 1    | other failure           |
//! | 2    | no input files found    |
//! | 3    | data read error         |
//! | 4    | no records found        |
//! | 5    | render error            |
//!
//! # Examples
//!
//! ```rust,no_run
//! use invoicegen_cli::core::{InvoiceError, user_friendly_error};
//!
//! let error = InvoiceError::EmptyDataset {
//!     file: "data/invoices.csv".to_string(),
//! };
//! assert_eq!(error.exit_code(), 4);
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for invoicegen operations.
///
/// Each variant names one failure mode and carries the values a user needs
/// to fix it (paths, identifiers, the underlying reason).
#[derive(Error, Debug)]
pub enum InvoiceError {
    /// The data file passed to the loader does not exist.
    #[error("Data file not found: {path}")]
    DataFileNotFound {
        /// Path that was requested
        path: String,
    },

    /// The data file exists but reading it failed.
    #[error("Failed to read data file {path}: {reason}")]
    DataReadError {
        /// Path that was read
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// The template file does not exist.
    #[error("Template file not found: {path}")]
    TemplateNotFound {
        /// Path that was requested
        path: String,
    },

    /// The requested identifier is not present in the record index.
    #[error("No record with identifier '{identifier}'")]
    IdentifierNotFound {
        /// Identifier the caller asked for
        identifier: String,
        /// Closest known identifiers, best match first
        suggestions: Vec<String>,
    },

    /// Content could not be decoded or does not match a supported shape.
    #[error("Unsupported or malformed data in {file}: {reason}")]
    FormatError {
        /// File being read
        file: String,
        /// What was wrong, phrased for the user
        reason: String,
    },

    /// The source parsed but produced zero records.
    #[error("No records found in {file}")]
    EmptyDataset {
        /// File being read
        file: String,
    },

    /// The external document engine failed.
    #[error("Document rendering failed ({engine}): {reason}")]
    RenderError {
        /// Engine name, e.g. "weasyprint"
        engine: String,
        /// Engine diagnostics (usually stderr)
        reason: String,
    },

    /// A directory scan found nothing usable.
    #[error("No input files found in {dir}")]
    NoInputFiles {
        /// Directory (or directories) that were scanned
        dir: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anything else
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl InvoiceError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NoInputFiles {
                ..
            } => 2,
            Self::DataFileNotFound {
                ..
            }
            | Self::DataReadError {
                ..
            }
            | Self::FormatError {
                ..
            } => 3,
            Self::EmptyDataset {
                ..
            } => 4,
            Self::RenderError {
                ..
            } => 5,
            _ => 1,
        }
    }

    /// Shorthand for a [`InvoiceError::FormatError`] on `file`.
    pub fn format(file: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::FormatError {
            file: file.to_string(),
            reason: reason.into(),
        }
    }
}

impl Clone for InvoiceError {
    fn clone(&self) -> Self {
        match self {
            Self::DataFileNotFound {
                path,
            } => Self::DataFileNotFound {
                path: path.clone(),
            },
            Self::DataReadError {
                path,
                reason,
            } => Self::DataReadError {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::TemplateNotFound {
                path,
            } => Self::TemplateNotFound {
                path: path.clone(),
            },
            Self::IdentifierNotFound {
                identifier,
                suggestions,
            } => Self::IdentifierNotFound {
                identifier: identifier.clone(),
                suggestions: suggestions.clone(),
            },
            Self::FormatError {
                file,
                reason,
            } => Self::FormatError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::EmptyDataset {
                file,
            } => Self::EmptyDataset {
                file: file.clone(),
            },
            Self::RenderError {
                engine,
                reason,
            } => Self::RenderError {
                engine: engine.clone(),
                reason: reason.clone(),
            },
            Self::NoInputFiles {
                dir,
            } => Self::NoInputFiles {
                dir: dir.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io::Error is not Clone, keep its text
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error wrapper carrying a suggestion and extra details for CLI display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: InvoiceError,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Longer explanation
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error without suggestion or details.
    #[must_use]
    pub const fn new(error: InvoiceError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Exit code of the wrapped error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.error.exit_code()
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`InvoiceError`] (anywhere in the chain), [`std::io::Error`],
/// and [`toml::de::Error`]; everything else becomes [`InvoiceError::Other`]
/// with the full cause chain in its message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(invoice_error) = error.chain().find_map(|e| e.downcast_ref::<InvoiceError>()) {
        return create_error_context(invoice_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(InvoiceError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion(
                    "Check file ownership and permissions of the input and output paths",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(InvoiceError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion(
                    "Check that the file or directory exists and the path is correct",
                );
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(InvoiceError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion(
            "Check the TOML syntax in your config file. Verify quotes, brackets, and key names",
        );
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(InvoiceError::Other {
        message,
    })
}

/// Map each [`InvoiceError`] variant to a context with tailored suggestions.
fn create_error_context(error: InvoiceError) -> ErrorContext {
    match &error {
        InvoiceError::DataFileNotFound {
            path,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Check that '{path}' exists. Run 'invoicegen files' to list available data files"
            ))
            .with_details("Data files must be .csv or .json"),

        InvoiceError::DataReadError {
            path,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Check that '{path}' is a readable file, not a directory")),

        InvoiceError::TemplateNotFound {
            path,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Check that '{path}' exists and is an .html template")),

        InvoiceError::IdentifierNotFound {
            identifier,
            suggestions,
        } => {
            let ctx = ErrorContext::new(error.clone()).with_details(format!(
                "Identifiers are matched exactly; '{identifier}' is not one of the \
                 identifiers listed by 'invoicegen ids'"
            ));
            if suggestions.is_empty() {
                ctx.with_suggestion("Run 'invoicegen ids <DATA>' to list the available identifiers")
            } else {
                ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }

        InvoiceError::FormatError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(
                "JSON files must hold a list of objects, an object wrapping such a list \
                 (e.g. {\"invoices\": [...]}), or an object of objects keyed by identifier. \
                 CSV files need a header row",
            )
            .with_details(
                "CSV files may be UTF-8 (with or without BOM), Windows-1251, KOI8-R or CP866 \
                 encoded",
            ),

        InvoiceError::EmptyDataset {
            file,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Add at least one data row or object to {file}")),

        InvoiceError::RenderError {
            engine,
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(if engine == "weasyprint" {
            "Install WeasyPrint ('pip install weasyprint') or set [engine] program in the \
             config file. Use '--format html' to skip the PDF step"
        } else {
            "Check that the output directory is writable"
        }),

        InvoiceError::NoInputFiles {
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(
            "Put at least one .csv/.json file in the data directory and one .html template \
             in the templates directory",
        ),

        InvoiceError::ConfigError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check the config file passed with --config or INVOICEGEN_CONFIG"),

        _ => ErrorContext::new(error.clone()),
    }
}

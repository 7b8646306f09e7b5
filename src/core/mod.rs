//! Core types shared by every layer of invoicegen.
//!
//! Currently this is the error taxonomy and its user-facing reporting; see
//! [`error`] for the exit-code mapping consumed by the binary.

pub mod error;

pub use error::{ErrorContext, InvoiceError, user_friendly_error};

/// Result alias for library operations that fail with [`InvoiceError`].
pub type Result<T, E = InvoiceError> = std::result::Result<T, E>;

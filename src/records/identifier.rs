//! Identifier resolution.
//!
//! An identifier is derived from the first candidate field, in priority
//! order, that holds a usable value. Resolution only looks at the record's
//! own fields, so the same record always resolves the same way no matter
//! where it sits in the file.

use super::record::{Record, scalar_text};
use crate::constants::{DEFAULT_IDENTIFIER_FIELDS, NAN_SENTINEL};

/// Derives a record's identifier from an ordered list of candidate fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierResolver {
    candidates: Vec<String>,
}

impl Default for IdentifierResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTIFIER_FIELDS.iter().copied())
    }
}

impl IdentifierResolver {
    /// Resolver trying `candidates` in the given order.
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Candidate field names in priority order.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Identifier of `record`, or `None` when no candidate holds a usable value.
    ///
    /// Field names match case-insensitively, and every field matching a
    /// candidate is tried before moving on to the next candidate. A value is
    /// usable when it is a scalar whose trimmed text is neither empty nor the
    /// `nan` placeholder.
    #[must_use]
    pub fn resolve(&self, record: &Record) -> Option<String> {
        self.candidates.iter().find_map(|candidate| {
            record
                .iter_ignore_case(candidate)
                .find_map(|(_, value)| usable_identifier(&scalar_text(value)?))
        })
    }
}

fn usable_identifier(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NAN_SENTINEL) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

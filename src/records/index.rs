//! Identifier → record lookup for one pipeline run.
//!
//! # Duplicate identifiers
//!
//! When several records resolve to the same identifier the **last** one in
//! source order wins and the earlier ones become unreachable. This is the
//! documented policy, not an error: every overwrite is logged at `warn`
//! level and listed by [`RecordIndex::overwritten`] so callers can surface it.

use std::collections::{HashMap, HashSet};

use strsim::levenshtein;

use super::identifier::IdentifierResolver;
use super::record::Record;
use crate::constants::{AUTO_ID_PREFIX, MAX_IDENTIFIER_SUGGESTIONS};

/// Records keyed by resolved identifier.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    records: HashMap<String, Record>,
    overwritten: Vec<String>,
    auto_assigned: usize,
}

impl RecordIndex {
    /// Build the index from records in source order.
    ///
    /// Records without a resolvable identifier get `AUTO-<n>`, where `n`
    /// counts only those records (1-based, source order). A number whose
    /// `AUTO-<n>` is already taken by a resolved identifier is skipped, so
    /// generated identifiers never collide with real ones.
    #[must_use]
    pub fn build(records: Vec<Record>, resolver: &IdentifierResolver) -> Self {
        let resolved: Vec<Option<String>> = records.iter().map(|r| resolver.resolve(r)).collect();
        let auto_ids = {
            let taken: HashSet<&str> = resolved.iter().flatten().map(String::as_str).collect();
            let mut ids = Vec::new();
            let mut counter = 0usize;
            for _ in resolved.iter().filter(|id| id.is_none()) {
                let id = loop {
                    counter += 1;
                    let candidate = format!("{AUTO_ID_PREFIX}{counter}");
                    if !taken.contains(candidate.as_str()) {
                        break candidate;
                    }
                };
                ids.push(id);
            }
            ids
        };
        let auto_assigned = auto_ids.len();
        let mut auto_ids = auto_ids.into_iter();

        let mut index = Self {
            records: HashMap::with_capacity(records.len()),
            overwritten: Vec::new(),
            auto_assigned,
        };

        for (record, id) in records.into_iter().zip(resolved) {
            let id = match id {
                Some(id) => id,
                None => auto_ids.next().unwrap_or_default(),
            };
            if index.records.insert(id.clone(), record).is_some() {
                tracing::warn!(
                    "Identifier '{}' appears more than once; \
                     the later record replaces the earlier one",
                    id
                );
                index.overwritten.push(id);
            }
        }

        tracing::debug!(
            "Indexed {} identifiers ({} auto-assigned, {} overwritten)",
            index.records.len(),
            index.auto_assigned,
            index.overwritten.len()
        );
        index
    }

    /// Record for `identifier`, matched exactly.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Record> {
        self.records.get(identifier)
    }

    /// Whether `identifier` is indexed.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.records.contains_key(identifier)
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records that received an `AUTO-<n>` identifier.
    #[must_use]
    pub const fn auto_assigned(&self) -> usize {
        self.auto_assigned
    }

    /// Identifiers whose earlier record was replaced, in the order the
    /// replacements happened (an identifier seen three times appears twice).
    #[must_use]
    pub fn overwritten(&self) -> &[String] {
        &self.overwritten
    }

    /// All identifiers, sorted case-insensitively (ties broken by the raw text).
    #[must_use]
    pub fn list_identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.keys().cloned().collect();
        ids.sort_by_cached_key(|id| (id.to_lowercase(), id.clone()));
        ids
    }

    /// Identifiers closest to `identifier` by edit distance, best first.
    ///
    /// Only identifiers within half the length of `identifier` are returned.
    #[must_use]
    pub fn suggest(&self, identifier: &str) -> Vec<String> {
        let limit = identifier.chars().count().div_ceil(2);
        let wanted = identifier.to_lowercase();
        let mut scored: Vec<(usize, String)> = self
            .list_identifiers()
            .into_iter()
            .map(|id| (levenshtein(&wanted, &id.to_lowercase()), id))
            .filter(|(distance, _)| *distance <= limit)
            .collect();
        scored.sort_by_key(|(distance, _)| *distance);
        scored.into_iter().take(MAX_IDENTIFIER_SUGGESTIONS).map(|(_, id)| id).collect()
    }
}

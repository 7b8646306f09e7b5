//! The normalized record type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field set made available to template substitution for one render.
pub type Context = Map<String, Value>;

/// One normalized key→value unit extracted from a data file.
///
/// Field order follows the source (column order for CSV, key order for
/// JSON). Values are scalars for tabular sources; JSON records may nest
/// objects and arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`, matched exactly.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// First field (in record order) whose name equals `field` ignoring case.
    #[must_use]
    pub fn get_ignore_case(&self, field: &str) -> Option<(&str, &Value)> {
        self.iter_ignore_case(field).next()
    }

    /// Every field whose name equals `field` ignoring case, in record order.
    pub fn iter_ignore_case(&self, field: &str) -> impl Iterator<Item = (&str, &Value)> {
        let wanted = field.to_lowercase();
        self.0
            .iter()
            .filter(move |(name, _)| name.to_lowercase() == wanted)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Whether `field` is present, matched exactly.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Set `field`, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Set `field` only when absent. Returns whether the value was stored.
    pub fn insert_if_absent(&mut self, field: &str, value: impl Into<Value>) -> bool {
        if self.0.contains_key(field) {
            return false;
        }
        self.0.insert(field.to_string(), value.into());
        true
    }

    /// Field names in record order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Fields in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Copy the fields into a fresh render context.
    #[must_use]
    pub fn to_context(&self) -> Context {
        self.0.clone()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Object(record.0)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Text form of a scalar value, or `None` for null and containers.
///
/// Strings are returned as-is, numbers in their JSON spelling, booleans as
/// `true`/`false`.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

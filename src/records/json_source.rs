//! Hierarchical (JSON) decoding.
//!
//! Three document shapes are accepted, see [`SourceShape`]. The shape is
//! picked by inspecting the parsed document once; decoding then follows the
//! variant without further guessing.

use serde_json::{Map, Value};

use super::identifier::IdentifierResolver;
use super::loader::SourceShape;
use super::record::Record;
use crate::constants::{IDENTIFIER_FIELD, WRAPPING_KEYS};

/// Message used when a document matches none of the supported shapes.
pub const EXPECTED_SHAPES: &str = "expected a list of objects, \
     an object wrapping a list of objects (e.g. {\"invoices\": [...]}), \
     or an object whose values are objects keyed by identifier";

/// Pick the shape of a parsed JSON document.
///
/// Order: top-level array, conventional wrapping key holding an array of
/// objects, the first other field holding an array of objects, an object with
/// at least one object-valued field. An array counts as "of objects" when at
/// least one of its entries is an object.
#[must_use]
pub fn detect_shape(document: &Value) -> Option<SourceShape> {
    match document {
        Value::Array(_) => Some(SourceShape::List),
        Value::Object(map) => detect_object_shape(map),
        _ => None,
    }
}

fn holds_objects(value: &Value) -> bool {
    value.as_array().is_some_and(|items| items.iter().any(Value::is_object))
}

fn detect_object_shape(map: &Map<String, Value>) -> Option<SourceShape> {
    if let Some(key) = WRAPPING_KEYS.iter().find(|key| map.get(**key).is_some_and(holds_objects)) {
        return Some(SourceShape::WrappedList {
            key: (*key).to_string(),
        });
    }

    if let Some((key, _)) = map.iter().find(|(_, value)| holds_objects(value)) {
        return Some(SourceShape::WrappedList {
            key: key.clone(),
        });
    }

    if map.values().any(Value::is_object) {
        return Some(SourceShape::DictOfObjects);
    }

    None
}

/// Decode `document` according to `shape`.
///
/// Non-object entries are skipped. In [`SourceShape::DictOfObjects`] the
/// dictionary key is stored as `invoice_id` on records that carry no
/// identifier of their own.
#[must_use]
pub fn decode(document: Value, shape: &SourceShape, resolver: &IdentifierResolver) -> Vec<Record> {
    match (shape, document) {
        (SourceShape::List, Value::Array(items)) => objects_only(items),
        (SourceShape::WrappedList { key }, Value::Object(mut map)) => match map.remove(key) {
            Some(Value::Array(items)) => objects_only(items),
            _ => Vec::new(),
        },
        (SourceShape::DictOfObjects, Value::Object(map)) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Object(fields) => {
                    let mut record = Record::from(fields);
                    if resolver.resolve(&record).is_none() {
                        record.insert(IDENTIFIER_FIELD, key);
                    }
                    Some(record)
                }
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn objects_only(items: Vec<Value>) -> Vec<Record> {
    let total = items.len();
    let records: Vec<Record> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(Record::from(map)),
            _ => None,
        })
        .collect();
    if records.len() < total {
        tracing::debug!("Skipped {} non-object entries", total - records.len());
    }
    records
}

/// Parse JSON bytes and decode the records.
///
/// # Errors
///
/// Returns a human-readable reason for invalid JSON or an unsupported shape.
pub fn parse_bytes(
    bytes: &[u8],
    resolver: &IdentifierResolver,
) -> Result<(SourceShape, Vec<Record>), String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(bytes);
    let document: Value = serde_json::from_slice(bytes).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            format!("invalid JSON at line {}, column {}: {}", e.line(), e.column(), e)
        } else {
            format!("invalid JSON: {e}")
        }
    })?;

    let shape = detect_shape(&document)
        .ok_or_else(|| format!("{EXPECTED_SHAPES}; found {}", describe(&document)))?;
    let records = decode(document, &shape, resolver);
    Ok((shape, records))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without lists or nested objects",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordIndex;
    use serde_json::json;

    fn parse(value: Value) -> Result<(SourceShape, Vec<Record>), String> {
        parse_bytes(value.to_string().as_bytes(), &IdentifierResolver::default())
    }

    #[test]
    fn test_list_skips_non_objects() {
        let (shape, records) = parse(json!([{"id": 1}, 5, "x", {"id": 2}])).unwrap();
        assert_eq!(shape, SourceShape::List);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_wrapped_list_items() {
        let (shape, records) = parse(json!({"items": [{"invoice": "Z1", "total": 100}]})).unwrap();
        assert_eq!(
            shape,
            SourceShape::WrappedList {
                key: "items".to_string()
            }
        );
        assert_eq!(records.len(), 1);
        assert_eq!(Value::from(records[0].clone()), json!({"invoice": "Z1", "total": 100}));
    }

    #[test]
    fn test_conventional_key_wins_over_earlier_list() {
        let (shape, _) =
            parse(json!({"tags": [{"a": 1}], "invoices": [{"invoice_id": "A"}]})).unwrap();
        assert_eq!(
            shape,
            SourceShape::WrappedList {
                key: "invoices".to_string()
            }
        );
    }

    #[test]
    fn test_conventional_key_without_objects_is_skipped() {
        let (shape, records) =
            parse(json!({"data": [1, 2], "invoices_list": [{"id": "A"}]})).unwrap();
        assert_eq!(
            shape,
            SourceShape::WrappedList {
                key: "invoices_list".to_string()
            }
        );
        assert_eq!(records.len(), 1);

        let err = parse(json!({"invoices": []})).unwrap_err();
        assert!(err.contains("expected a list of objects"), "{err}");
    }

    #[test]
    fn test_unconventional_wrapping_key() {
        let (shape, records) =
            parse(json!({"meta": {"v": 1}, "checks": [{"check_id": "C1"}]})).unwrap();
        assert_eq!(
            shape,
            SourceShape::WrappedList {
                key: "checks".to_string()
            }
        );
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_dict_of_objects_injects_key() {
        let (shape, records) = parse(json!({
            "INV-1": {"total": 10},
            "INV-2": {"id": "own", "total": 20},
            "note": "skipped"
        }))
        .unwrap();
        assert_eq!(shape, SourceShape::DictOfObjects);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("invoice_id"), Some(&json!("INV-1")));
        assert!(!records[1].contains("invoice_id"));
    }

    #[test]
    fn test_dict_of_objects_replaces_blank_identifier() {
        let (_, records) = parse(json!({"K": {"id": "  "}})).unwrap();
        assert_eq!(records[0].get("invoice_id"), Some(&json!("K")));
    }

    #[test]
    fn test_dict_key_identifies_record_with_null_case_variant() {
        let document = json!({"K-1": {"Invoice_ID": null, "total": 1}});
        let (_, records) = parse(document).unwrap();
        assert_eq!(records[0].get("invoice_id"), Some(&json!("K-1")));

        let index = RecordIndex::build(records, &IdentifierResolver::default());
        assert_eq!(index.list_identifiers(), vec!["K-1"]);
    }

    #[test]
    fn test_unsupported_shapes() {
        let err = parse(json!({"a": 1, "b": "x"})).unwrap_err();
        assert!(err.contains("expected a list of objects"));
        let err = parse(json!(42)).unwrap_err();
        assert!(err.contains("found a number"));
    }

    #[test]
    fn test_invalid_json_reports_position() {
        let err = parse_bytes(b"{\n  \"a\": [1,\n", &IdentifierResolver::default()).unwrap_err();
        assert!(err.starts_with("invalid JSON at line"), "{err}");
    }

    #[test]
    fn test_bom_is_tolerated() {
        let (_, records) =
            parse_bytes(b"\xEF\xBB\xBF[{\"id\": 1}]", &IdentifierResolver::default()).unwrap();
        assert_eq!(records.len(), 1);
    }
}

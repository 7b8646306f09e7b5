//! Loading data files of every supported shape.

use invoicegen_cli::config::Config;
use invoicegen_cli::core::InvoiceError;
use invoicegen_cli::records::{RecordIndex, RecordLoader, SourceShape, TextEncoding};
use invoicegen_cli::test_utils::{DataFixture, TestEnvironment};
use serde_json::json;

fn loader() -> RecordLoader {
    RecordLoader::new(Config::default().resolver())
}

#[test]
fn test_load_semicolon_csv_with_bom() {
    let env = TestEnvironment::new().unwrap();
    let path = env.add_data(&DataFixture::csv_semicolon_bom()).unwrap();

    let loaded = loader().load(&path).unwrap();
    assert_eq!(
        loaded.shape,
        SourceShape::Tabular {
            delimiter: b';',
            encoding: TextEncoding::Utf8Bom,
        }
    );
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records[0].get("Номер"), Some(&json!("17")));
    assert_eq!(loaded.records[0].get("Сумма"), Some(&json!("1200,50")));

    let index = RecordIndex::build(loaded.records, &Config::default().resolver());
    assert_eq!(index.list_identifiers(), vec!["17", "18"]);
}

#[test]
fn test_load_windows_1251_csv() {
    let env = TestEnvironment::new().unwrap();
    let path = env.add_data(&DataFixture::csv_windows_1251()).unwrap();

    let loaded = loader().load(&path).unwrap();
    assert!(matches!(
        loaded.shape,
        SourceShape::Tabular {
            encoding: TextEncoding::Windows1251,
            ..
        }
    ));
    assert_eq!(loaded.records[0].get("клиент"), Some(&json!("Сидоров")));
}

#[test]
fn test_load_wrapped_list() {
    let env = TestEnvironment::new().unwrap();
    let path = env.add_data(&DataFixture::json_wrapped()).unwrap();

    let loaded = loader().load(&path).unwrap();
    assert_eq!(
        loaded.shape,
        SourceShape::WrappedList {
            key: "items".to_string()
        }
    );

    let index = RecordIndex::build(loaded.records, &Config::default().resolver());
    assert!(index.contains("Z1"));
}

#[test]
fn test_load_dict_of_objects() {
    let env = TestEnvironment::new().unwrap();
    let path = env.add_data(&DataFixture::json_dict()).unwrap();

    let loaded = loader().load(&path).unwrap();
    assert_eq!(loaded.shape, SourceShape::DictOfObjects);

    let index = RecordIndex::build(loaded.records, &Config::default().resolver());
    assert_eq!(index.list_identifiers(), vec!["K-1", "OWN-2"]);
    assert_eq!(index.get("K-1").unwrap().get("invoice_id"), Some(&json!("K-1")));
    assert!(!index.get("OWN-2").unwrap().contains("invoice_id"));
}

#[test]
fn test_load_list_keeps_nested_values() {
    let env = TestEnvironment::new().unwrap();
    let path = env.add_data(&DataFixture::json_list()).unwrap();

    let loaded = loader().load(&path).unwrap();
    assert_eq!(loaded.shape, SourceShape::List);
    assert_eq!(
        loaded.records[0].get("customer"),
        Some(&json!({"name": "Иванов", "city": "<Moscow>"}))
    );
    assert_eq!(loaded.records[1].get("customer"), Some(&json!(null)));
}

#[test]
fn test_load_errors_map_to_exit_codes() {
    let env = TestEnvironment::new().unwrap();

    let err = loader().load(&env.data_dir().join("missing.csv")).unwrap_err();
    assert!(matches!(err, InvoiceError::DataFileNotFound { .. }));
    assert_eq!(err.exit_code(), 3);

    let path = env.add_data(&DataFixture::new("invoices.xlsx", "x")).unwrap();
    let err = loader().load(&path).unwrap_err();
    assert!(matches!(err, InvoiceError::FormatError { .. }));

    let path = env.add_data(&DataFixture::json_unsupported()).unwrap();
    let err = loader().load(&path).unwrap_err();
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_load_uppercase_extension() {
    let env = TestEnvironment::new().unwrap();
    let path = env.add_data(&DataFixture::new("UPPER.CSV", "id\nQ\n")).unwrap();

    let loaded = loader().load(&path).unwrap();
    assert_eq!(loaded.records.len(), 1);
}

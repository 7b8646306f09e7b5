//! Tests for `invoicegen ids` and `invoicegen show`.

use invoicegen_cli::test_utils::{DataFixture, TestEnvironment};
use predicates::prelude::*;

use crate::common::invoicegen;

#[test]
fn test_ids_sorted_one_per_line() {
    let env = TestEnvironment::new().unwrap();
    let data = env
        .add_data(&DataFixture::new("mixed.json", r#"[{"id": "b"}, {"id": "C"}, {"id": "a"}]"#))
        .unwrap();

    invoicegen(&env).arg("ids").arg(&data).assert().success().stdout("a\nb\nC\n");
}

#[test]
fn test_ids_auto_assigned_and_last_write_wins() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::csv_duplicates()).unwrap();

    invoicegen(&env).arg("ids").arg(&data).assert().success().stdout("A\nAUTO-1\n");
}

#[test]
fn test_ids_missing_file_exits_3() {
    let env = TestEnvironment::new().unwrap();

    invoicegen(&env)
        .args(["ids", "data/none.csv"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Data file not found"));
}

#[test]
fn test_ids_unsupported_json_exits_3() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::json_unsupported()).unwrap();

    invoicegen(&env)
        .arg("ids")
        .arg(&data)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("expected a list of objects"));
}

#[test]
fn test_ids_header_only_exits_4() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::csv_header_only()).unwrap();

    invoicegen(&env)
        .arg("ids")
        .arg(&data)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No records found"));
}

#[test]
fn test_show_prints_record_json() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::json_dict()).unwrap();

    invoicegen(&env)
        .arg("show")
        .arg(&data)
        .arg("K-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"invoice_id\": \"K-1\""))
        .stdout(predicate::str::contains("\"total\": 10"));
}

#[test]
fn test_show_unknown_id_suggests() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::csv_basic()).unwrap();

    invoicegen(&env)
        .arg("show")
        .arg(&data)
        .arg("INV-01")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No record with identifier 'INV-01'"))
        .stderr(predicate::str::contains("INV-001"));
}

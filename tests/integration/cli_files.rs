//! Tests for `invoicegen files`.

use invoicegen_cli::test_utils::{DataFixture, TemplateFixture, TestEnvironment};
use predicates::prelude::*;

use crate::common::invoicegen;

#[test]
fn test_files_lists_data_and_templates() {
    let env = TestEnvironment::new().unwrap();
    env.add_data(&DataFixture::csv_basic()).unwrap();
    env.add_data(&DataFixture::json_wrapped()).unwrap();
    env.add_data(&DataFixture::new("notes.md", "ignored")).unwrap();
    env.add_template(&TemplateFixture::invoice()).unwrap();

    invoicegen(&env)
        .arg("files")
        .assert()
        .success()
        .stdout(predicate::str::contains("invoices.csv"))
        .stdout(predicate::str::contains("wrapped.json"))
        .stdout(predicate::str::contains("invoice.html"))
        .stdout(predicate::str::contains("notes.md").not());
}

#[test]
fn test_files_without_templates_exits_2() {
    let env = TestEnvironment::new().unwrap();
    env.add_data(&DataFixture::csv_basic()).unwrap();

    invoicegen(&env)
        .arg("files")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No input files found"));
}

#[test]
fn test_files_never_creates_directories() {
    let env = TestEnvironment::new().unwrap();

    invoicegen(&env).arg("files").assert().code(2);

    assert!(!env.file_exists("data"));
    assert!(!env.file_exists("templates"));
    assert!(!env.file_exists("output"));
}

#[test]
fn test_files_custom_directories() {
    let env = TestEnvironment::new().unwrap();
    let inputs = env.project_path().join("inputs");
    DataFixture::json_dict().write_to(&inputs).unwrap();
    TemplateFixture::nested().write_to(&inputs).unwrap();

    invoicegen(&env)
        .args(["files", "--data-dir", "inputs", "--templates-dir", "inputs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dict.json"))
        .stdout(predicate::str::contains("nested.html"));
}

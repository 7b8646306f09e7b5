//! Tests for `invoicegen render`.

use assert_cmd::Command;
use invoicegen_cli::test_utils::{DataFixture, TemplateFixture, TestEnvironment};
use predicates::prelude::*;
use serial_test::serial;

use crate::common::invoicegen;

fn setup() -> TestEnvironment {
    let env = TestEnvironment::new().unwrap();
    env.add_data(&DataFixture::csv_basic()).unwrap();
    env.add_data(&DataFixture::json_list()).unwrap();
    env.add_template(&TemplateFixture::invoice()).unwrap();
    env.add_template(&TemplateFixture::nested()).unwrap();
    env
}

#[test]
fn test_render_html_to_default_output() {
    let env = setup();

    invoicegen(&env)
        .args(["render", "data/invoices.csv", "templates/invoice.html", "INV-002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-002.html"));

    let html = env.read_file("output/INV-002.html").unwrap();
    assert!(html.contains("<h1>Invoice INV-002</h1>"));
    assert!(html.contains("<p>Globex</p>"));
    assert!(html.contains("Total: 250.50"));
    assert!(html.contains("@page"));
    assert!(!html.contains("{{"));
}

#[test]
fn test_render_escapes_values() {
    let env = setup();

    invoicegen(&env)
        .args(["render", "data/invoices.csv", "templates/invoice.html", "INV-001"])
        .assert()
        .success();

    let html = env.read_file("output/INV-001.html").unwrap();
    assert!(html.contains("<p>Acme &amp; Co</p>"));
}

#[test]
fn test_render_nested_paths() {
    let env = setup();

    invoicegen(&env)
        .args(["render", "data/invoices.json", "templates/nested.html", "INV-100"])
        .assert()
        .success();

    let html = env.read_file("output/INV-100.html").unwrap();
    assert!(html.contains("<p>Иванов / &lt;Moscow&gt; / 42</p>"));
}

#[test]
fn test_render_null_and_nan_are_empty() {
    let env = setup();

    invoicegen(&env)
        .args(["render", "data/invoices.json", "templates/nested.html", "INV-101"])
        .assert()
        .success();

    let html = env.read_file("output/INV-101.html").unwrap();
    assert!(html.contains("<p> /  / </p>"));
}

#[test]
fn test_render_explicit_output_creates_parent() {
    let env = setup();

    invoicegen(&env)
        .args([
            "render",
            "data/invoices.csv",
            "templates/invoice.html",
            "INV-003",
            "-o",
            "custom/out/inv.html",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("inv.html"));

    let html = env.read_file("custom/out/inv.html").unwrap();
    assert!(html.contains("Initech, LLC"));
    assert!(!env.file_exists("output"));
}

#[test]
fn test_render_identifier_is_trimmed() {
    let env = setup();

    invoicegen(&env)
        .args(["render", "data/invoices.csv", "templates/invoice.html", "  INV-001  "])
        .assert()
        .success();

    assert!(env.file_exists("output/INV-001.html"));
}

#[test]
fn test_render_unknown_identifier_suggests() {
    let env = setup();

    invoicegen(&env)
        .args(["render", "data/invoices.csv", "templates/invoice.html", "INV-0002"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No record with identifier 'INV-0002'"))
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("INV-002"));

    assert!(!env.file_exists("output"));
}

#[test]
fn test_render_missing_template() {
    let env = setup();

    invoicegen(&env)
        .args(["render", "data/invoices.csv", "templates/missing.html", "INV-001"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template file not found"));
}

#[test]
fn test_render_missing_data_exits_3() {
    let env = setup();

    invoicegen(&env)
        .args(["render", "data/none.json", "templates/invoice.html", "INV-001"])
        .assert()
        .code(3);
}

#[test]
fn test_render_malformed_json_exits_3() {
    let env = setup();
    env.add_data(&DataFixture::json_invalid()).unwrap();

    invoicegen(&env)
        .args(["render", "data/broken.json", "templates/invoice.html", "X"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn test_render_missing_font_is_config_error() {
    let env = setup();

    invoicegen(&env)
        .args([
            "render",
            "data/invoices.csv",
            "templates/invoice.html",
            "INV-001",
            "--font",
            "fonts/none.ttf",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Font file not found"));
}

#[test]
fn test_render_table_content_lists_every_field() {
    let env = setup();
    env.add_template(&TemplateFixture::new("table.html", "<body>{{ table_content }}</body>"))
        .unwrap();

    invoicegen(&env)
        .args(["render", "data/invoices.csv", "templates/table.html", "INV-001"])
        .assert()
        .success();

    let html = env.read_file("output/INV-001.html").unwrap();
    assert!(html.contains("<table>"));
    assert!(html.contains("<th>customer</th>"));
    assert!(html.contains("<td>Acme &amp; Co</td>"));
    assert!(!html.contains("&lt;td&gt;"));
}

#[test]
fn test_render_pdf_without_weasyprint_exits_5() {
    let env = setup();
    let mut config = env.config();
    config.engine.program = "invoicegen-missing-weasyprint".to_string();
    let config_path = env.temp_dir.path().join("pdf.toml");
    config.save_to(&config_path).unwrap();

    invoicegen(&env)
        .env("INVOICEGEN_CONFIG", &config_path)
        .args(["render", "data/invoices.csv", "templates/invoice.html", "INV-001"])
        .args(["--format", "pdf"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("invoicegen-missing-weasyprint"))
        .stderr(predicate::str::contains("--format html"));
}

#[test]
#[serial]
fn test_render_config_flag_overrides_env() {
    let env = setup();
    let mut config = env.config();
    config.output_dir = env.project_path().join("elsewhere");
    let config_path = env.temp_dir.path().join("elsewhere.toml");
    config.save_to(&config_path).unwrap();

    Command::cargo_bin("invoicegen")
        .unwrap()
        .current_dir(env.project_path())
        .env("INVOICEGEN_CONFIG", env.temp_dir.path().join("absent.toml"))
        .arg("--config")
        .arg(&config_path)
        .args(["render", "data/invoices.csv", "templates/invoice.html", "INV-001"])
        .assert()
        .success();

    assert!(env.file_exists("elsewhere/INV-001.html"));
}

//! Library-level rendering through `RenderPipeline`.

use invoicegen_cli::core::InvoiceError;
use invoicegen_cli::pipeline::{RenderPipeline, RenderRequest};
use invoicegen_cli::test_utils::{DataFixture, TemplateFixture, TestEnvironment};

#[test]
fn test_run_writes_html_document() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::csv_basic()).unwrap();
    let template = env.add_template(&TemplateFixture::invoice()).unwrap();
    let pipeline = RenderPipeline::new(&env.config()).unwrap();

    let outcome = pipeline
        .run(&RenderRequest {
            data,
            template,
            identifier: "INV-003".to_string(),
            output: None,
        })
        .unwrap();

    assert_eq!(outcome.output, env.output_dir().join("INV-003.html"));
    assert_eq!(outcome.identifier, "INV-003");
    assert_eq!(outcome.engine, "html");
    assert!(outcome.unresolved.is_empty());

    let html = env.read_file("output/INV-003.html").unwrap();
    assert!(html.contains("Initech, LLC"));
    assert!(!html.contains("{{ generated_at }}"));
}

#[test]
fn test_run_reports_unresolved_placeholders() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::csv_basic()).unwrap();
    let template = env
        .add_template(&TemplateFixture::new("extra.html", "<p>{{ total }} {{ due_date }}</p>"))
        .unwrap();
    let pipeline = RenderPipeline::new(&env.config()).unwrap();

    let outcome = pipeline
        .run(&RenderRequest {
            data,
            template,
            identifier: "INV-001".to_string(),
            output: Some(env.project_path().join("extra.html")),
        })
        .unwrap();

    assert_eq!(outcome.unresolved, vec!["due_date"]);
    assert!(env.read_file("extra.html").unwrap().contains("<p>100 </p>"));
}

#[test]
fn test_render_html_uses_record_fields_over_injected_ones() {
    let env = TestEnvironment::new().unwrap();
    let data = env
        .add_data(&DataFixture::new(
            "own.json",
            r#"[{"id": "A-1", "generated_at": "fixed"}]"#,
        ))
        .unwrap();
    let template = env
        .add_template(&TemplateFixture::new("t.html", "{{invoice_id}}|{{generated_at}}"))
        .unwrap();
    let pipeline = RenderPipeline::new(&env.config()).unwrap();

    let index = pipeline.load_index(&data).unwrap();
    let html = pipeline.render_html(&index, &template, "A-1", "2026-01-01 00:00:00").unwrap();
    assert_eq!(html, "A-1|fixed");
}

#[test]
fn test_load_index_header_only_is_empty_dataset() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::csv_header_only()).unwrap();
    let pipeline = RenderPipeline::new(&env.config()).unwrap();

    let err = pipeline.load_index(&data).unwrap_err();
    assert!(matches!(err, InvoiceError::EmptyDataset { .. }));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn test_unknown_identifier_writes_nothing() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::csv_basic()).unwrap();
    let template = env.add_template(&TemplateFixture::invoice()).unwrap();
    let pipeline = RenderPipeline::new(&env.config()).unwrap();

    let err = pipeline
        .run(&RenderRequest {
            data,
            template,
            identifier: "INV-004".to_string(),
            output: None,
        })
        .unwrap_err();

    match err {
        InvoiceError::IdentifierNotFound {
            identifier,
            suggestions,
        } => {
            assert_eq!(identifier, "INV-004");
            assert!(suggestions.contains(&"INV-001".to_string()));
        }
        other => panic!("Expected IdentifierNotFound, got {other:?}"),
    }
    assert!(!env.output_dir().exists());
}

#[test]
fn test_unsafe_identifier_gets_safe_filename() {
    let env = TestEnvironment::new().unwrap();
    let data = env.add_data(&DataFixture::new("slash.csv", "id,total\n2024/07 #1,5\n")).unwrap();
    let template = env.add_template(&TemplateFixture::invoice()).unwrap();
    let pipeline = RenderPipeline::new(&env.config()).unwrap();

    let outcome = pipeline
        .run(&RenderRequest {
            data,
            template,
            identifier: "2024/07 #1".to_string(),
            output: None,
        })
        .unwrap();

    assert_eq!(outcome.output, env.output_dir().join("2024_07_1.html"));
    assert!(outcome.output.exists());
}

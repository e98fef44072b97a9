//! Tests for the JSON Schema validation plugin

use ghga_metadata_utils::generator::{GeneratorResult, JsonSchemaSource};
use ghga_metadata_utils::validator::{JsonSchemaValidationPlugin, ValidationPlugin, load_record};
use linkml_core::types::SchemaDefinition;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> String {
    format!("{FIXTURES}/{name}")
}

async fn plugin() -> JsonSchemaValidationPlugin {
    JsonSchemaValidationPlugin::from_path(fixture("ghga_mini.yaml"), None)
        .await
        .expect("plugin should load the schema")
}

#[tokio::test]
async fn test_valid_submission() {
    let plugin = plugin().await;
    let record = load_record(fixture("submission_valid.json"))
        .await
        .expect("record should load");

    let report = plugin
        .process(&record, Some("Submission"))
        .expect("validation should run");

    assert!(report.valid, "unexpected errors: {:?}", report.messages());
    assert_eq!(report.plugin.as_deref(), Some("GhgaJsonschemaValidationPlugin"));
    assert_eq!(report.target_class.as_deref(), Some("Submission"));
    assert_eq!(report.schema_id.as_deref(), Some("https://w3id.org/GHGA-Mini"));
}

#[tokio::test]
async fn test_invalid_submission_reports_paths() {
    let plugin = plugin().await;
    let record = load_record(fixture("submission_invalid.yaml"))
        .await
        .expect("record should load");

    let report = plugin
        .process(&record, Some("Submission"))
        .expect("validation should run");

    assert!(!report.valid);
    let messages = report.messages();
    assert!(
        messages.iter().any(|m| m.contains("has_study")),
        "missing has_study not reported: {messages:?}"
    );
    // BIO:2 lacks its alias, so neither the keyed form nor the identifier list matches
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.path.as_deref() == Some("/has_biospecimen")),
        "invalid biospecimen not reported: {messages:?}"
    );
}

#[tokio::test]
async fn test_identifier_accepted_for_reference_slot() {
    let plugin = plugin().await;
    let record = json!({
        "id": "SUB:3",
        "has_study": "STUDY:3",
        "main_contact": "CONTACT:1",
    });

    let report = plugin
        .process(&record, Some("Submission"))
        .expect("validation should run");
    assert!(report.valid, "unexpected errors: {:?}", report.messages());

    let record = json!({"id": "SUB:3", "has_study": "STUDY:3", "main_contact": 42});
    let report = plugin
        .process(&record, Some("Submission"))
        .expect("validation should run");
    assert!(!report.valid);
}

#[tokio::test]
async fn test_identifier_list_accepted_for_keyed_collection() {
    let plugin = plugin().await;
    let record = json!({
        "id": "SUB:5",
        "has_study": "STUDY:5",
        "has_biospecimen": ["BIO:5", "BIO:6"],
    });

    let report = plugin
        .process(&record, Some("Submission"))
        .expect("validation should run");
    assert!(report.valid, "unexpected errors: {:?}", report.messages());

    let record = json!({"id": "SUB:5", "has_study": "STUDY:5", "has_biospecimen": [5]});
    let report = plugin
        .process(&record, Some("Submission"))
        .expect("validation should run");
    assert!(!report.valid);
}

#[tokio::test]
async fn test_closed_class_rejects_unknown_fields() {
    let plugin = plugin().await;
    let record = json!({
        "id": "SUB:4",
        "has_study": "STUDY:4",
        "has_biospecimen": {
            "BIO:4": {"id": "BIO:4", "alias": "bio_4", "colour": "blue"}
        }
    });

    let report = plugin
        .process(&record, Some("Submission"))
        .expect("validation should run");
    assert!(!report.valid);
}

#[tokio::test]
async fn test_unknown_target_class_is_an_error() {
    let plugin = plugin().await;
    assert!(plugin.process(&json!({}), Some("Dataset")).is_err());
}

struct CountingSource {
    calls: Arc<AtomicUsize>,
}

impl JsonSchemaSource for CountingSource {
    fn json_schema(
        &self,
        _schema: &SchemaDefinition,
        _top_class: Option<&str>,
    ) -> GeneratorResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({
            "type": "object",
            "required": ["alias"],
        }))
    }
}

#[tokio::test]
async fn test_custom_source_is_compiled_once_per_class() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        calls: Arc::clone(&calls),
    };
    let plugin =
        JsonSchemaValidationPlugin::from_path(fixture("ghga_mini.yaml"), Some(Box::new(source)))
            .await
            .expect("plugin should load the schema");

    for _ in 0..3 {
        let report = plugin
            .process(&json!({"alias": "a"}), Some("Sample"))
            .expect("validation should run");
        assert!(report.valid);
    }
    let report = plugin
        .process(&json!({}), Some("Study"))
        .expect("validation should run");
    assert!(!report.valid);

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(plugin.name(), JsonSchemaValidationPlugin::NAME);
}

#[tokio::test]
async fn test_missing_schema_file() {
    let result = JsonSchemaValidationPlugin::from_path(fixture("missing.yaml"), None).await;
    let err = result.err().expect("loading must fail");
    assert!(err.to_string().contains("missing.yaml"));
}

//! Tests for the ghga-metadata command line

use clap::Parser;
use ghga_metadata_utils::cli::{GhgaMetadataApp, GhgaMetadataCli};
use serde_json::Value;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

async fn execute(args: &[&str]) -> (anyhow::Result<()>, String) {
    let cli = GhgaMetadataCli::try_parse_from(std::iter::once("ghga-metadata").chain(args.iter().copied()))
        .expect("arguments should parse");
    let mut out = Vec::new();
    let result = GhgaMetadataApp::new(cli).execute(&mut out).await;
    (result, String::from_utf8(out).expect("utf8 output"))
}

fn fixture(name: &str) -> String {
    format!("{FIXTURES}/{name}")
}

#[tokio::test]
async fn test_gen_pydantic() {
    let schema = fixture("ghga_mini.yaml");
    let (result, output) = execute(&["gen-pydantic", &schema]).await;

    result.expect("command should succeed");
    assert!(output.contains("class Submission(BaseModel):"));
    assert!(output.contains("AnnotatedBiospecimen = Annotated["));
}

#[tokio::test]
async fn test_gen_json_schema_closed() {
    let schema = fixture("ghga_mini.yaml");
    let (result, output) =
        execute(&["gen-json-schema", &schema, "-t", "Study", "--closed"]).await;

    result.expect("command should succeed");
    let document: Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(document["additionalProperties"], false);
    assert!(document["properties"]["title"].is_object());
}

#[tokio::test]
async fn test_validate_reports_each_file() {
    let schema = fixture("ghga_mini.yaml");
    let valid = fixture("submission_valid.json");
    let invalid = fixture("submission_invalid.yaml");

    let (result, output) =
        execute(&["validate", "--schema", &schema, "-C", "Submission", &valid]).await;
    result.expect("valid record should pass");
    assert!(output.contains("submission_valid.json: valid"));

    let (result, output) = execute(&[
        "validate",
        "--schema",
        &schema,
        "--target-class",
        "Submission",
        &valid,
        &invalid,
    ])
    .await;
    let err = result.expect_err("invalid record must fail the command");
    assert_eq!(err.to_string(), "1 of 2 record(s) failed validation");
    assert!(output.contains("submission_invalid.yaml: invalid"));
}

#[tokio::test]
async fn test_validate_json_format() {
    let schema = fixture("ghga_mini.yaml");
    let valid = fixture("submission_valid.json");
    let (result, output) = execute(&[
        "validate", "--schema", &schema, "-C", "Submission", "-f", "json", &valid,
    ])
    .await;

    result.expect("command should succeed");
    let line: Value = serde_json::from_str(output.trim()).expect("one JSON line");
    assert_eq!(line["report"]["valid"], true);
    assert_eq!(line["report"]["plugin"], "GhgaJsonschemaValidationPlugin");
}

#[tokio::test]
async fn test_unresolvable_range_names_the_range() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.yaml");
    std::fs::write(
        &path,
        "id: https://example.org/broken\nname: broken\nclasses:\n  Dataset:\n    slots: [size]\nslots:\n  size:\n    range: bignum\n",
    )
    .expect("write schema");

    let (result, output) = execute(&["gen-pydantic", &path.display().to_string()]).await;
    let err = result.expect_err("generation must fail");
    assert!(err.to_string().contains("'bignum'"));
    assert!(output.is_empty());
}

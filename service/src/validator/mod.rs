//! Metadata record validation

pub mod plugin;

pub use plugin::{JsonSchemaValidationPlugin, ValidationPlugin};

use crate::loader::SchemaFormat;
use linkml_core::error::{LinkMLError, Result};
use serde_json::Value;
use std::path::Path;

/// Read a metadata record from a JSON or YAML file
///
/// # Errors
/// Returns an error naming the path if the file cannot be read or parsed
pub async fn load_record(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let location = path.display().to_string();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LinkMLError::parse_at(format!("{location}: {e}"), location.clone()))?;

    let record = match SchemaFormat::from_path(path)? {
        SchemaFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| LinkMLError::parse_at(format!("{location}: {e}"), location.clone()))?,
        SchemaFormat::Json => serde_json::from_str(&content)
            .map_err(|e| LinkMLError::parse_at(format!("{location}: {e}"), location.clone()))?,
    };
    Ok(record)
}

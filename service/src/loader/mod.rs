//! Schema loading
//!
//! Reads `LinkML` schemas from YAML or JSON. Imports are recorded but never
//! resolved; the builtin `linkml:types` are always known to `SchemaView`.

use linkml_core::{
    error::{LinkMLError, Result},
    types::SchemaDefinition,
};
use std::path::Path;
use tracing::debug;

/// Serialization format of a schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// YAML (`.yaml`, `.yml`)
    Yaml,
    /// JSON (`.json`)
    Json,
}

impl SchemaFormat {
    /// Detect the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns a parse error if the path has no extension or an unsupported one.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                LinkMLError::parse_at("No file extension found", path.display().to_string())
            })?;

        match extension {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(LinkMLError::parse_at(
                format!("Unsupported file format: {extension}"),
                path.display().to_string(),
            )),
        }
    }
}

/// Parse a YAML schema document
///
/// # Errors
///
/// Returns a parse error if the document is not a valid schema.
pub fn parse_schema_str(content: &str) -> Result<SchemaDefinition> {
    parse_with_format(content, SchemaFormat::Yaml)
}

/// Parse a schema document in the given format
///
/// # Errors
///
/// Returns a parse error if the document is not a valid schema.
pub fn parse_with_format(content: &str, format: SchemaFormat) -> Result<SchemaDefinition> {
    let mut schema: SchemaDefinition = match format {
        SchemaFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| LinkMLError::parse(e.to_string()))?
        }
        SchemaFormat::Json => {
            serde_json::from_str(content).map_err(|e| LinkMLError::parse(e.to_string()))?
        }
    };
    schema.normalize_names();
    Ok(schema)
}

/// Load a schema file, picking the format by extension
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be read or parsed.
pub async fn load_schema(path: impl AsRef<Path>) -> Result<SchemaDefinition> {
    let path = path.as_ref();
    let location = path.display().to_string();
    let format = SchemaFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LinkMLError::parse_at(format!("{location}: {e}"), location.clone()))?;

    let mut schema = parse_with_format(&content, format).map_err(|e| match e {
        LinkMLError::ParseError { message, .. } => {
            LinkMLError::parse_at(format!("{location}: {message}"), location.clone())
        }
        other => other,
    })?;
    schema.source_file = Some(location);

    debug!(
        schema = %schema.name,
        classes = schema.classes.len(),
        slots = schema.slots.len(),
        "Loaded schema"
    );
    Ok(schema)
}

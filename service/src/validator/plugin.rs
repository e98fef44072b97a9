//! JSON Schema validation plugin for GHGA metadata records

use crate::generator::{JsonSchemaGenerator, JsonSchemaSource};
use crate::loader::load_schema;
use jsonschema::JSONSchema;
use linkml_core::prelude::*;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// A validation step applied to one metadata record
pub trait ValidationPlugin: Send + Sync {
    /// Plugin name, reported in every [`ValidationReport`]
    fn name(&self) -> &str;

    /// Validate `record` as an instance of `target_class`
    ///
    /// # Errors
    /// Returns an error if the plugin cannot run at all; invalid records
    /// produce an invalid report instead.
    fn process(&self, record: &Value, target_class: Option<&str>) -> Result<ValidationReport>;
}

/// Validates records against the JSON Schema derived from a `LinkML` schema.
///
/// The JSON Schema comes from [`JsonSchemaGenerator`] unless another
/// [`JsonSchemaSource`] is supplied, and is compiled once per target class.
pub struct JsonSchemaValidationPlugin {
    schema: SchemaDefinition,
    source: Box<dyn JsonSchemaSource>,
    compiled: RwLock<HashMap<String, Arc<JSONSchema>>>,
}

impl JsonSchemaValidationPlugin {
    /// Registered plugin name
    pub const NAME: &'static str = "GhgaJsonschemaValidationPlugin";

    /// Create a plugin using the default JSON Schema generator
    #[must_use]
    pub fn new(schema: SchemaDefinition) -> Self {
        Self::with_source(schema, Box::new(JsonSchemaGenerator::new()))
    }

    /// Create a plugin using a custom JSON Schema source
    #[must_use]
    pub fn with_source(schema: SchemaDefinition, source: Box<dyn JsonSchemaSource>) -> Self {
        Self {
            schema,
            source,
            compiled: RwLock::new(HashMap::new()),
        }
    }

    /// Load the schema at `path` and create a plugin for it
    ///
    /// # Errors
    /// Returns an error if the schema cannot be loaded
    pub async fn from_path(
        path: impl AsRef<Path>,
        source: Option<Box<dyn JsonSchemaSource>>,
    ) -> Result<Self> {
        let schema = load_schema(path).await?;
        Ok(match source {
            Some(source) => Self::with_source(schema, source),
            None => Self::new(schema),
        })
    }

    /// The schema records are validated against
    #[must_use]
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    fn validator(&self, target_class: Option<&str>) -> Result<Arc<JSONSchema>> {
        let key = target_class.unwrap_or_default().to_string();
        if let Some(validator) = self.compiled.read().get(&key) {
            return Ok(Arc::clone(validator));
        }

        let json_schema = self.source.json_schema(&self.schema, target_class)?;
        let validator = JSONSchema::compile(&json_schema).map_err(|e| {
            LinkMLError::schema_validation(format!("Generated JSON Schema does not compile: {e}"))
        })?;
        debug!(target_class = %key, "Compiled JSON Schema validator");

        let validator = Arc::new(validator);
        self.compiled
            .write()
            .entry(key)
            .or_insert_with(|| Arc::clone(&validator));
        Ok(validator)
    }
}

impl ValidationPlugin for JsonSchemaValidationPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process(&self, record: &Value, target_class: Option<&str>) -> Result<ValidationReport> {
        let validator = self.validator(target_class)?;

        let errors: Vec<ValidationError> = match validator.validate(record) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    ValidationError::new(error.to_string())
                        .with_path(error.instance_path.to_string())
                })
                .collect(),
        };

        let mut report = ValidationReport::from_errors(errors);
        report.plugin = Some(Self::NAME.to_string());
        report.target_class = target_class.map(ToString::to_string);
        report.schema_id = Some(self.schema.id.clone());

        info!(
            plugin = Self::NAME,
            target_class = ?target_class,
            valid = report.valid,
            errors = report.errors.len(),
            "Validated record"
        );
        Ok(report)
    }
}

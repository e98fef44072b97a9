//! Core generator traits and types
//!
//! This module defines the error type, options and trait shared by the
//! Pydantic and JSON Schema generators.

use linkml_core::prelude::*;
use thiserror::Error;

/// Result type for generator operations
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur during code generation
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A slot range that is neither a class, an enum, a type nor absent
    #[error("Unresolvable range '{range}' for slot '{slot}' in class '{class}'")]
    UnresolvableRange {
        /// The offending range value
        range: String,
        /// Slot declaring the range
        slot: String,
        /// Class the slot was induced for
        class: String,
    },

    /// Schema validation error
    #[error("Schema validation failed: {0}")]
    Validation(String),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `LinkML` core error
    #[error("LinkML error: {0}")]
    LinkML(#[from] LinkMLError),
}

impl GeneratorError {
    /// Build an `UnresolvableRange` error
    pub fn unresolvable(
        range: impl Into<String>,
        slot: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self::UnresolvableRange {
            range: range.into(),
            slot: slot.into(),
            class: class.into(),
        }
    }
}

impl From<GeneratorError> for LinkMLError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::LinkML(inner) => inner,
            GeneratorError::Io(inner) => LinkMLError::IoError(inner),
            other => LinkMLError::schema_validation(other.to_string()),
        }
    }
}

/// Options for code generation
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Include documentation in generated code
    pub include_docs: bool,
}

impl GeneratorOptions {
    /// Create new generator options
    #[must_use]
    pub fn new() -> Self {
        Self { include_docs: true }
    }

    /// Set whether to include documentation
    #[must_use]
    pub fn with_docs(mut self, include_docs: bool) -> Self {
        self.include_docs = include_docs;
        self
    }
}

/// Core trait for synchronous code generators
pub trait Generator: Send + Sync {
    /// Get generator name
    fn name(&self) -> &str;

    /// Get generator description
    fn description(&self) -> &str;

    /// Generate code from a schema
    ///
    /// # Errors
    /// Returns an error if the schema is invalid or a slot range cannot be
    /// resolved
    fn generate(&self, schema: &SchemaDefinition) -> GeneratorResult<String>;

    /// Get the file extension for generated files
    fn get_file_extension(&self) -> &str;

    /// Get the default filename for generated files
    fn get_default_filename(&self) -> &str;

    /// Validate schema before generation
    ///
    /// # Errors
    /// Returns an error if the schema validation fails
    fn validate_schema(&self, schema: &SchemaDefinition) -> GeneratorResult<()> {
        if schema.name.is_empty() {
            return Err(GeneratorError::Validation(
                "Schema must have a name".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolvable_range_message() {
        let err = GeneratorError::unresolvable("Mystery", "has_thing", "Dataset");
        assert_eq!(
            err.to_string(),
            "Unresolvable range 'Mystery' for slot 'has_thing' in class 'Dataset'"
        );

        let core: LinkMLError = err.into();
        assert!(core.to_string().contains("Mystery"));
    }

    #[test]
    fn test_options_builder() {
        assert!(GeneratorOptions::new().include_docs);
        assert!(!GeneratorOptions::new().with_docs(false).include_docs);
        // Derived default leaves docs off
        assert!(!GeneratorOptions::default().include_docs);
    }
}

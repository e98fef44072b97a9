//! Validation report types shared by validators and their callers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for validation messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning that doesn't prevent processing
    Warning,
    /// Error that prevents successful processing
    #[default]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Outcome of validating one record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Is the data valid?
    pub valid: bool,

    /// Name of the plugin that produced this report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,

    /// Class the record was validated as
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_class: Option<String>,

    /// Validation errors
    #[serde(default)]
    pub errors: Vec<ValidationError>,

    /// Validation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,

    /// Schema used for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
}

impl ValidationReport {
    /// Build a report from collected errors; valid if none are errors
    #[must_use]
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        let valid = errors.iter().all(|e| e.severity < Severity::Error);
        Self {
            valid,
            errors,
            timestamp: Some(chrono::Utc::now()),
            ..Default::default()
        }
    }

    /// Messages of every error, in order
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error message
    pub message: String,

    /// JSON pointer to the offending value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Error severity
    #[serde(default)]
    pub severity: Severity,
}

impl ValidationError {
    /// Create an error-level message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            severity: Severity::Error,
        }
    }

    /// Attach the instance path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.is_empty() { None } else { Some(path) };
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "Validation error at {}: {}", path, self.message)
        } else {
            write!(f, "Validation error: {}", self.message)
        }
    }
}

//! # GHGA Metadata Utils
//!
//! `LinkML` generators and metadata validation for the GHGA metadata schema.
//!
//! ## Overview
//!
//! - **Pydantic generation**: every slot range is resolved to a type
//!   expression. Polymorphic class ranges become discriminated unions on
//!   `schema_type`, and reference slots (`has_*`, `main_contact`) also accept
//!   plain identifier strings.
//! - **JSON Schema generation**: draft-07 output with the same reference-slot
//!   relaxation.
//! - **Validation**: the `GhgaJsonschemaValidationPlugin` checks metadata
//!   records against the generated JSON Schema.
//! - **Configuration**: microservice settings from YAML and environment
//!   variables.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ghga_metadata_utils::generator::{Generator, PydanticGenerator};
//! use ghga_metadata_utils::loader::load_schema;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = load_schema("ghga.yaml").await?;
//!     let models = PydanticGenerator::new().generate(&schema)?;
//!     std::fs::write("models.py", models)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Validation
//!
//! ```rust,no_run
//! use ghga_metadata_utils::validator::{JsonSchemaValidationPlugin, ValidationPlugin};
//! use serde_json::json;
//!
//! # async fn run() -> linkml_core::Result<()> {
//! let plugin = JsonSchemaValidationPlugin::from_path("ghga.yaml", None).await?;
//! let report = plugin.process(&json!({"alias": "sample_1"}), Some("Sample"))?;
//! if !report.valid {
//!     for message in report.messages() {
//!         eprintln!("{message}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)] // LinkML, GHGA and Pydantic are proper nouns
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::format_push_string)]

/// Command-line interface
pub mod cli;

/// Microservice configuration
pub mod config;

/// Pydantic and JSON Schema generators
pub mod generator;

/// Schema loading
pub mod loader;

/// Schema introspection
pub mod schema_view;

/// Metadata record validation
pub mod validator;

pub use generator::{Generator, GeneratorError, JsonSchemaGenerator, PydanticGenerator};
pub use linkml_core::error::LinkMLError;
pub use linkml_core::prelude::ValidationReport;
pub use schema_view::SchemaView;
pub use validator::{JsonSchemaValidationPlugin, ValidationPlugin};

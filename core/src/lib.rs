//! # `LinkML` Core
//!
//! Schema model, naming helpers and error types shared by the GHGA
//! metadata generators and validators.
//!
//! The model covers the subset of the `LinkML` metamodel the generators
//! read: classes with single inheritance and mixins, slots with
//! `slot_usage` overrides, types, and enums.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types for `LinkML` operations
pub mod error;

/// Type definitions for `LinkML` schemas
pub mod types;

/// Validation report types
pub mod validation;

/// `LinkML` naming conventions
pub mod utils;

pub use error::{LinkMLError, Result};
pub use types::{
    ClassDefinition, EnumDefinition, PermissibleValue, SchemaDefinition, SlotDefinition,
    TypeDefinition,
};
pub use validation::{Severity, ValidationError, ValidationReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{LinkMLError, Result};
    pub use crate::types::*;
    pub use crate::utils::{camelcase, underscore};
    pub use crate::validation::*;
}

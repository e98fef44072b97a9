//! Code generation for GHGA metadata schemas
//!
//! Both generators share the reference-slot convention. The Pydantic
//! generator goes through the [`RangeResolver`], which turns every induced
//! slot into a [`TypeExpr`] and collects discriminated unions along the way.

pub mod json_schema;
pub mod pydantic;
pub mod range_resolver;
pub mod reference_slots;
pub mod template;
pub mod traits;
pub mod type_expr;

pub use json_schema::{JsonSchemaGenerator, JsonSchemaOptions, JsonSchemaSource};
pub use pydantic::PydanticGenerator;
pub use range_resolver::{
    RangeResolver, ResolvedClass, ResolvedEnum, ResolvedSchema, ResolvedSlot, SCHEMA_TYPE,
    UnionDefinition,
};
pub use reference_slots::ReferenceSlots;
pub use template::{DEFAULT_TEMPLATE, PydanticTemplate, TemplateContext};
pub use traits::{Generator, GeneratorError, GeneratorOptions, GeneratorResult};
pub use type_expr::{PythonTypeFormatter, TypeExpr, TypeFormatter};

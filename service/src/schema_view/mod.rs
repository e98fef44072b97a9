//! Schema introspection
//!
//! `SchemaView` answers the inheritance, slot induction and type mapping
//! questions the generators ask about a loaded schema.

pub mod primitives;
pub mod view;

pub use primitives::{BUILTIN_TYPES, PrimitiveType};
pub use view::{ANY_CLASS_URI, SchemaView};

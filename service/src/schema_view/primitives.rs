//! Builtin `LinkML` types and their Python primitive mapping

use std::fmt;

/// Target-language primitive a schema type resolves to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `str`
    Str,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `bool`
    Bool,
    /// `Decimal`
    Decimal,
    /// `date`
    Date,
    /// `datetime`
    DateTime,
    /// A `repr` or `base` the mapping does not know, emitted verbatim
    Custom(String),
}

impl PrimitiveType {
    /// Python spelling of the primitive
    #[must_use]
    pub fn python_name(&self) -> &str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Decimal => "Decimal",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Custom(name) => name,
        }
    }

    /// JSON Schema `type` and optional `format` for the primitive
    #[must_use]
    pub fn json_schema_type(&self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::Int => ("integer", None),
            Self::Float | Self::Decimal => ("number", None),
            Self::Bool => ("boolean", None),
            Self::Date => ("string", Some("date")),
            Self::DateTime => ("string", Some("date-time")),
            Self::Str | Self::Custom(_) => ("string", None),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.python_name())
    }
}

/// Names of the types every schema implicitly imports from `linkml:types`
pub const BUILTIN_TYPES: &[&str] = &[
    "string",
    "integer",
    "boolean",
    "float",
    "double",
    "decimal",
    "time",
    "date",
    "datetime",
    "date_or_datetime",
    "uriorcurie",
    "curie",
    "uri",
    "ncname",
    "objectidentifier",
    "nodeidentifier",
    "jsonpointer",
    "jsonpath",
    "sparqlpath",
];

/// Primitive of a builtin type, `None` for non-builtins
#[must_use]
pub fn builtin_primitive(name: &str) -> Option<PrimitiveType> {
    let primitive = match name {
        "integer" => PrimitiveType::Int,
        "boolean" => PrimitiveType::Bool,
        "float" | "double" => PrimitiveType::Float,
        "decimal" => PrimitiveType::Decimal,
        "date" => PrimitiveType::Date,
        "datetime" => PrimitiveType::DateTime,
        other if BUILTIN_TYPES.contains(&other) => PrimitiveType::Str,
        _ => return None,
    };
    Some(primitive)
}

/// Primitive for a type's Python `base` class name
#[must_use]
pub fn base_primitive(base: &str) -> PrimitiveType {
    match base {
        "str" | "URI" | "URIorCURIE" | "Curie" | "NCName" | "XSDTime" => PrimitiveType::Str,
        "int" => PrimitiveType::Int,
        "float" => PrimitiveType::Float,
        "Bool" | "bool" => PrimitiveType::Bool,
        "Decimal" => PrimitiveType::Decimal,
        "XSDDate" => PrimitiveType::Date,
        "XSDDateTime" => PrimitiveType::DateTime,
        other => PrimitiveType::Custom(other.to_string()),
    }
}

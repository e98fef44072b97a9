//! Target-language independent type expressions
//!
//! The range resolver builds a `TypeExpr` per slot; a `TypeFormatter`
//! renders it to concrete syntax.

use crate::schema_view::PrimitiveType;
use std::fmt;

/// Resolved type of one slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A primitive such as `str` or `int`
    Primitive(PrimitiveType),
    /// A generated class, enum or union alias
    Named(String),
    /// Unconstrained value
    Any,
    /// Discriminator literal carrying the owning class name
    Literal(String),
    /// Ordered sequence
    Sequence(Box<TypeExpr>),
    /// Mapping from key to value
    Mapping {
        /// Key type, always `str` for identifier-keyed collections
        key: Box<TypeExpr>,
        /// Value type
        value: Box<TypeExpr>,
    },
    /// One of several alternatives
    Union(Vec<TypeExpr>),
    /// Nullable, absent by default
    Optional(Box<TypeExpr>),
}

impl TypeExpr {
    /// Plain string
    #[must_use]
    pub fn string() -> Self {
        Self::Primitive(PrimitiveType::Str)
    }

    /// Named type
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Sequence of `self`
    #[must_use]
    pub fn sequence(self) -> Self {
        Self::Sequence(Box::new(self))
    }

    /// String-keyed mapping to `self`
    #[must_use]
    pub fn keyed_by_string(self) -> Self {
        Self::Mapping {
            key: Box::new(Self::string()),
            value: Box::new(self),
        }
    }

    /// `self` or `other`
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Union(vec![self, other])
    }

    /// Optional `self`
    #[must_use]
    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Whether this is exactly `str`
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveType::Str))
    }

    /// Whether this is a sequence of `str`
    #[must_use]
    pub fn is_string_sequence(&self) -> bool {
        matches!(self, Self::Sequence(inner) if inner.is_string())
    }

    /// Whether the value may be absent
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PythonTypeFormatter.format(self))
    }
}

/// Renders type expressions to a concrete syntax
pub trait TypeFormatter {
    /// Render `expr`
    fn format(&self, expr: &TypeExpr) -> String;
}

/// Python `typing` syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonTypeFormatter;

impl TypeFormatter for PythonTypeFormatter {
    fn format(&self, expr: &TypeExpr) -> String {
        match expr {
            TypeExpr::Primitive(primitive) => primitive.python_name().to_string(),
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::Any => "Any".to_string(),
            TypeExpr::Literal(value) => format!("Literal[\"{value}\"]"),
            TypeExpr::Sequence(inner) => format!("List[{}]", self.format(inner)),
            TypeExpr::Mapping { key, value } => {
                format!("Dict[{}, {}]", self.format(key), self.format(value))
            }
            TypeExpr::Union(members) => {
                let members: Vec<String> = members.iter().map(|m| self.format(m)).collect();
                format!("Union[{}]", members.join(", "))
            }
            TypeExpr::Optional(inner) => format!("Optional[{}]", self.format(inner)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_rendering() {
        let fmt = PythonTypeFormatter;
        assert_eq!(fmt.format(&TypeExpr::string()), "str");
        assert_eq!(
            fmt.format(&TypeExpr::Literal("Biospecimen".to_string())),
            "Literal[\"Biospecimen\"]"
        );
        let expr = TypeExpr::named("AnnotatedSample")
            .keyed_by_string()
            .or(TypeExpr::string().sequence())
            .optional();
        assert_eq!(
            fmt.format(&expr),
            "Optional[Union[Dict[str, AnnotatedSample], List[str]]]"
        );
        assert_eq!(
            TypeExpr::Primitive(PrimitiveType::Int).sequence().to_string(),
            "List[int]"
        );
    }

    #[test]
    fn test_string_predicates() {
        assert!(TypeExpr::string().is_string());
        assert!(TypeExpr::string().sequence().is_string_sequence());
        assert!(!TypeExpr::named("Sample").sequence().is_string_sequence());
        assert!(!TypeExpr::Primitive(PrimitiveType::Custom("str".into())).is_string());
        assert!(TypeExpr::Any.optional().is_optional());
    }
}

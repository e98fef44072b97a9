//! Pydantic model generator for GHGA metadata schemas
//!
//! Reference slots accept either the embedded object or its identifier, and
//! ranges with subclasses become unions discriminated on `schema_type`.

use super::range_resolver::{RangeResolver, ResolvedClass, ResolvedEnum, ResolvedSchema, ResolvedSlot};
use super::template::{
    Annotation, AttributeContext, ClassContext, EnumContext, PYTHON_RANGE, PydanticTemplate,
    SchemaContext, TemplateContext,
};
use super::traits::{Generator, GeneratorOptions, GeneratorResult};
use super::type_expr::{PythonTypeFormatter, TypeFormatter};
use crate::schema_view::SchemaView;
use indexmap::IndexMap;
use linkml_core::prelude::*;
use tracing::info;

/// Pydantic generator
pub struct PydanticGenerator {
    name: String,
    description: String,
    template: PydanticTemplate,
    /// Generator options
    options: GeneratorOptions,
}

impl Default for PydanticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PydanticGenerator {
    /// Create a new Pydantic generator
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "ghga-pydantic".to_string(),
            description: "Generate Pydantic models with relaxed reference slots".to_string(),
            template: PydanticTemplate::default(),
            options: GeneratorOptions::new(),
        }
    }

    /// Create generator with options
    #[must_use]
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    /// Use a custom Jinja template
    #[must_use]
    pub fn with_template(mut self, template: PydanticTemplate) -> Self {
        self.template = template;
        self
    }

    /// Render an already resolved schema
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Template` if the template fails to render.
    pub fn render(&self, resolved: &ResolvedSchema) -> GeneratorResult<String> {
        self.template.render(&self.template_context(resolved))
    }

    /// Build the context templates are rendered against
    #[must_use]
    pub fn template_context(&self, resolved: &ResolvedSchema) -> TemplateContext {
        TemplateContext {
            schema: SchemaContext {
                name: resolved.name.clone(),
                id: resolved.id.clone(),
                description: resolved.description.as_deref().map(escape),
                classes: resolved
                    .classes
                    .iter()
                    .map(|class| (class.name.clone(), self.class_context(class)))
                    .collect(),
            },
            enums: resolved
                .enums
                .iter()
                .map(|enum_def| (enum_def.name.clone(), self.enum_context(enum_def)))
                .collect(),
            annotated_unions: resolved.unions.clone(),
            metamodel_version: resolved.metamodel_version.clone(),
            version: resolved.version.clone(),
        }
    }

    fn docstring(&self, description: Option<&str>) -> Option<String> {
        description
            .filter(|d| self.options.include_docs && !d.is_empty())
            .map(escape)
    }

    fn enum_context(&self, enum_def: &ResolvedEnum) -> EnumContext {
        EnumContext {
            name: enum_def.name.clone(),
            description: self.docstring(enum_def.description.as_deref()),
            values: enum_def
                .values
                .iter()
                .map(|(label, text)| (label.clone(), escape(text)))
                .collect(),
        }
    }

    fn class_context(&self, class: &ResolvedClass) -> ClassContext {
        ClassContext {
            name: class.name.clone(),
            is_a: class.parent.clone(),
            description: self.docstring(class.description.as_deref()),
            attributes: class
                .attributes
                .iter()
                .map(|attribute| (attribute.name.clone(), Self::attribute_context(attribute)))
                .collect(),
        }
    }

    fn attribute_context(attribute: &ResolvedSlot) -> AttributeContext {
        let python_range = Annotation {
            tag: PYTHON_RANGE.to_string(),
            value: PythonTypeFormatter.format(&attribute.type_expr),
        };
        AttributeContext {
            name: attribute.name.clone(),
            title: attribute.title.as_deref().map(escape),
            description: attribute
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(escape),
            required: attribute.required && !attribute.is_discriminator,
            minimum_value: attribute.minimum_value.clone(),
            maximum_value: attribute.maximum_value.clone(),
            annotations: IndexMap::from([(PYTHON_RANGE.to_string(), python_range)]),
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

impl Generator for PydanticGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn generate(&self, schema: &SchemaDefinition) -> GeneratorResult<String> {
        self.validate_schema(schema)?;

        let view = SchemaView::new(schema.clone())?;
        let mut resolver = RangeResolver::new(&view);
        let resolved = resolver.resolve_schema(&view)?;

        info!(
            schema = %schema.name,
            classes = resolved.classes.len(),
            enums = resolved.enums.len(),
            unions = resolved.unions.len(),
            "Generated Pydantic models"
        );
        self.render(&resolved)
    }

    fn get_file_extension(&self) -> &str {
        "py"
    }

    fn get_default_filename(&self) -> &str {
        "models.py"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::range_resolver::UnionDefinition;
    use crate::generator::type_expr::TypeExpr;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn slot(name: &str, type_expr: TypeExpr) -> ResolvedSlot {
        ResolvedSlot {
            name: name.to_string(),
            type_expr,
            required: false,
            is_discriminator: false,
            title: None,
            description: None,
            minimum_value: None,
            maximum_value: None,
        }
    }

    fn resolved(attributes: Vec<ResolvedSlot>) -> ResolvedSchema {
        ResolvedSchema {
            name: "mini".to_string(),
            id: "https://example.org/mini".to_string(),
            description: Some("A \"mini\" schema".to_string()),
            version: Some("0.1.0".to_string()),
            metamodel_version: None,
            enums: vec![ResolvedEnum {
                name: "Placeholder".to_string(),
                description: None,
                values: Vec::new(),
            }],
            classes: vec![ResolvedClass {
                name: "Thing".to_string(),
                source_name: "thing".to_string(),
                parent: None,
                description: Some("A thing".to_string()),
                attributes,
            }],
            unions: IndexMap::from([(
                "AnnotatedThing".to_string(),
                UnionDefinition {
                    name: "AnnotatedThing".to_string(),
                    discriminator_field: "schema_type".to_string(),
                    members: vec!["Part".to_string(), "Thing".to_string()],
                },
            )]),
        }
    }

    #[test]
    fn test_attribute_context() {
        let age = ResolvedSlot {
            required: true,
            title: Some("Age".to_string()),
            description: Some("Age in \"years\"".to_string()),
            minimum_value: Some(json!(0)),
            maximum_value: Some(json!(150)),
            ..slot("age", TypeExpr::string())
        };
        let context = PydanticGenerator::attribute_context(&age);
        assert_eq!(context.annotations[PYTHON_RANGE].value, "str");
        assert_eq!(context.description.as_deref(), Some("Age in \\\"years\\\""));
        assert!(context.required);

        let discriminator = ResolvedSlot {
            required: true,
            is_discriminator: true,
            ..slot("schema_type", TypeExpr::Literal("Sample".to_string()))
        };
        let context = PydanticGenerator::attribute_context(&discriminator);
        assert_eq!(context.annotations[PYTHON_RANGE].value, "Literal[\"Sample\"]");
        assert!(!context.required);
    }

    #[test]
    fn test_render_resolved_schema() {
        let age = ResolvedSlot {
            required: true,
            title: Some("Age".to_string()),
            description: Some("Age in \"years\"".to_string()),
            minimum_value: Some(json!(0)),
            maximum_value: Some(json!(150)),
            ..slot("age", TypeExpr::string())
        };
        let discriminator = ResolvedSlot {
            is_discriminator: true,
            ..slot("schema_type", TypeExpr::Literal("Thing".to_string()))
        };
        let alias = slot("alias", TypeExpr::string().optional());

        let code = PydanticGenerator::new()
            .render(&resolved(vec![age, alias, discriminator]))
            .expect("renders");

        assert!(code.contains("metamodel_version = \"None\"\nversion = \"0.1.0\"\n"));
        assert!(code.contains("class Placeholder(str, Enum):\n    dummy = \"dummy\"\n"));
        assert!(code.contains(
            "class Thing(BaseModel):\n    \"\"\"\n    A thing\n    \"\"\"\n    \
             age: str = Field(..., title=\"Age\", description=\"\"\"Age in \\\"years\\\"\"\"\", ge=0, le=150)\n    \
             alias: Optional[str] = Field(None)\n    \
             schema_type: Literal[\"Thing\"]\n"
        ));
        assert!(code.contains(
            "AnnotatedThing = Annotated[Union[Part,Thing], Field(discriminator=\"schema_type\")]"
        ));
        assert!(code.ends_with("Thing.update_forward_refs()\n"));
    }

    #[test]
    fn test_docs_off_drops_docstrings() {
        let generator = PydanticGenerator::with_options(GeneratorOptions::new().with_docs(false));
        let context = generator.template_context(&resolved(Vec::new()));
        assert_eq!(context.schema.classes["Thing"].description, None);

        let code = generator.render(&resolved(Vec::new())).expect("renders");
        assert!(code.contains("class Thing(BaseModel):\n    None\n"));
    }
}

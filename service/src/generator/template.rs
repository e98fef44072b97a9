//! Jinja templates for generated Python modules
//!
//! Templates are rendered with `minijinja` against a [`TemplateContext`]
//! shaped like the one `linkml`'s Python generators pass to Jinja2: the
//! schema with its classes and their attributes, the enums, the registry of
//! annotated unions and the two version strings. Python-style method calls
//! such as `schema.classes.values()` or `e['values'].items()` work through
//! `minijinja-contrib`'s pycompat callback.

use super::range_resolver::UnionDefinition;
use super::traits::{GeneratorError, GeneratorResult};
use indexmap::IndexMap;
use minijinja::Environment;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").expect("static pattern"));

/// Annotation key that carries the rendered Python type of an attribute
pub const PYTHON_RANGE: &str = "python_range";

/// Template used when no template file is given
pub const DEFAULT_TEMPLATE: &str = r#"{#- Pydantic models for a GHGA metadata schema -#}
from __future__ import annotations
from datetime import date, datetime
from decimal import Decimal
from enum import Enum
from typing import Any, Dict, List, Literal, Optional, Union
from typing_extensions import Annotated
from pydantic import BaseModel, Field

metamodel_version = "{{ metamodel_version if metamodel_version else "None" }}"
version = "{{ version if version else "None" }}"
{% for e in enums.values() %}

class {{ e.name }}(str, Enum):
{%- if e.description %}
    """
    {{ e.description }}
    """
{%- endif %}
{%- for label, value in e['values'].items() %}
    {{ label }} = "{{ value }}"
{%- else %}
    dummy = "dummy"
{%- endfor %}
{% endfor %}
{% for c in schema.classes.values() %}

class {{ c.name }}({{ c.is_a if c.is_a else "BaseModel" }}):
{%- if c.description %}
    """
    {{ c.description }}
    """
{%- endif %}
{%- for attr in c.attributes.values() %}
    {{ attr.name }}: {{ attr.annotations['python_range'].value }}
{%- if attr.name != "schema_type" %} = Field({{ "..." if attr.required else "None" }}
{%- if attr.title is not none %}, title="{{ attr.title }}"{% endif %}
{%- if attr.description %}, description="""{{ attr.description }}"""{% endif %}
{%- if attr.minimum_value is not none %}, ge={{ attr.minimum_value }}{% endif %}
{%- if attr.maximum_value is not none %}, le={{ attr.maximum_value }}{% endif %})
{%- endif %}
{%- else %}
    None
{%- endfor %}
{% endfor %}

{% for au in annotated_unions.values() %}
{{ au.name }} = Annotated[Union[{{ au.members|join(",") }}], Field(discriminator="{{ au.discriminator_field }}")]
{%- endfor %}


# Update forward refs
# see https://pydantic-docs.helpmanual.io/usage/postponed_annotations/
{% for c in schema.classes.values() -%}
{{ c.name }}.update_forward_refs()
{% endfor %}
"#;

/// A schema annotation, `tag: value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Annotation key
    pub tag: String,
    /// Annotation value
    pub value: String,
}

/// A class attribute as templates see it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeContext {
    /// Attribute name (underscored)
    pub name: String,
    /// Human-readable title
    pub title: Option<String>,
    /// Description with double quotes escaped
    pub description: Option<String>,
    /// Whether a value must be present
    pub required: bool,
    /// Inclusive lower bound
    pub minimum_value: Option<Value>,
    /// Inclusive upper bound
    pub maximum_value: Option<Value>,
    /// Annotations; `python_range` holds the rendered type hint
    pub annotations: IndexMap<String, Annotation>,
}

/// A class as templates see it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassContext {
    /// Generated name (camelcased)
    pub name: String,
    /// Generated name of the `is_a` parent
    pub is_a: Option<String>,
    /// Docstring text, absent when docs are turned off
    pub description: Option<String>,
    /// Attributes keyed by name
    pub attributes: IndexMap<String, AttributeContext>,
}

/// An enum as templates see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumContext {
    /// Generated name (camelcased)
    pub name: String,
    /// Docstring text, absent when docs are turned off
    pub description: Option<String>,
    /// Member label to value text
    pub values: IndexMap<String, String>,
}

/// The schema as templates see it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaContext {
    /// Schema name
    pub name: String,
    /// Schema URI
    pub id: String,
    /// Schema description
    pub description: Option<String>,
    /// Classes keyed by generated name, parents before children
    pub classes: IndexMap<String, ClassContext>,
}

/// Everything a template can reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateContext {
    /// The schema
    pub schema: SchemaContext,
    /// Enums keyed by generated name
    pub enums: IndexMap<String, EnumContext>,
    /// Discriminated unions keyed by alias name
    pub annotated_unions: IndexMap<String, UnionDefinition>,
    /// `LinkML` metamodel version of the schema
    pub metamodel_version: Option<String>,
    /// Schema version
    pub version: Option<String>,
}

/// A Jinja template for a Python module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PydanticTemplate {
    source: String,
}

impl Default for PydanticTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_unknown_method_callback(minijinja_contrib::pycompat::unknown_method_callback);
    env
}

fn template_error(err: &minijinja::Error) -> GeneratorError {
    GeneratorError::Template(err.to_string())
}

impl PydanticTemplate {
    /// Create a template from its text.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Template` if the text is not a valid Jinja
    /// template.
    pub fn new(source: impl Into<String>) -> GeneratorResult<Self> {
        let source = source.into();
        environment()
            .template_from_str(&source)
            .map_err(|err| template_error(&err))?;
        Ok(Self { source })
    }

    /// Read a template file
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a template error
    /// if it does not parse.
    pub async fn from_file(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path).await?;
        debug!(path = %path.display(), "Loaded Pydantic template");
        Self::new(source)
    }

    /// Template text
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render the template; runs of blank lines collapse to two
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Template` if rendering fails, for example on
    /// a call to an unknown filter.
    pub fn render(&self, context: &TemplateContext) -> GeneratorResult<String> {
        let rendered = environment()
            .render_str(&self.source, context)
            .map_err(|err| template_error(&err))?;
        Ok(BLANK_RUNS.replace_all(&rendered, "\n\n\n").into_owned())
    }
}

//! JSON Schema generation for GHGA metadata schemas
//!
//! Output follows draft-07 with class and enum definitions under `$defs`.
//! Reference slots additionally accept a plain identifier string wherever
//! they would otherwise only accept an embedded object.

use super::reference_slots::ReferenceSlots;
use super::traits::{Generator, GeneratorError, GeneratorResult};
use crate::schema_view::SchemaView;
use linkml_core::prelude::*;
use serde_json::{Map, Value as JsonValue, json};
use std::collections::HashSet;
use tracing::{debug, info};

/// `$schema` URI of the emitted documents
pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Options for [`JsonSchemaGenerator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSchemaOptions {
    /// Class whose slots become the top-level properties
    pub top_class: Option<String>,
    /// Embed every class range instead of referencing it by identifier
    pub inline: bool,
    /// Allow additional top-level properties
    pub not_closed: bool,
    /// Accept any non-abstract descendant of a range class
    pub include_range_class_descendants: bool,
}

impl Default for JsonSchemaOptions {
    fn default() -> Self {
        Self {
            top_class: None,
            inline: false,
            not_closed: true,
            include_range_class_descendants: false,
        }
    }
}

/// Produces the JSON Schema a validator checks records against
pub trait JsonSchemaSource: Send + Sync {
    /// JSON Schema for `schema` with `top_class` as the root object
    ///
    /// # Errors
    /// Returns an error if the JSON Schema cannot be generated
    fn json_schema(
        &self,
        schema: &SchemaDefinition,
        top_class: Option<&str>,
    ) -> GeneratorResult<JsonValue>;
}

/// `JSON` Schema generator with relaxed reference slots
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaGenerator {
    options: JsonSchemaOptions,
}

impl JsonSchemaGenerator {
    /// Create a new `JSON` Schema generator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new `JSON` Schema generator with options
    #[must_use]
    pub fn with_options(options: JsonSchemaOptions) -> Self {
        Self { options }
    }

    /// Generator options
    #[must_use]
    pub fn options(&self) -> &JsonSchemaOptions {
        &self.options
    }

    /// Generate the JSON Schema document as a value
    ///
    /// # Errors
    ///
    /// Returns an error if the top class does not exist or a slot range
    /// cannot be resolved.
    pub fn generate_value(&self, schema: &SchemaDefinition) -> GeneratorResult<JsonValue> {
        let view = SchemaView::new(schema.clone())?;
        let references = ReferenceSlots::from_view(&view);

        let top_class = match &self.options.top_class {
            Some(top) => Some(
                view.all_classes()
                    .values()
                    .find(|class| camelcase(&class.name) == camelcase(top))
                    .ok_or_else(|| {
                        GeneratorError::Validation(format!("Top class '{top}' not found"))
                    })?,
            ),
            None => None,
        };

        let mut definitions = Map::new();
        let mut root_properties = Map::new();
        let mut root_required = Vec::new();

        for class in view.all_classes().values() {
            let (properties, required) = self.class_properties(&view, &references, &class.name)?;

            let is_root = match top_class {
                Some(top) => top.name == class.name,
                None => class.tree_root.unwrap_or(false),
            };
            if is_root {
                root_properties.extend(properties.clone());
                root_required.extend(required.iter().cloned());
            }

            if class.mixin.unwrap_or(false) || class.abstract_.unwrap_or(false) {
                continue;
            }

            let mut class_schema = Map::new();
            class_schema.insert("title".to_string(), json!(camelcase(&class.name)));
            if let Some(description) = &class.description {
                class_schema.insert("description".to_string(), json!(description));
            }
            class_schema.insert("type".to_string(), json!("object"));
            class_schema.insert("properties".to_string(), JsonValue::Object(properties));
            class_schema.insert("required".to_string(), json!(required));
            class_schema.insert(
                "additionalProperties".to_string(),
                json!(view.is_any_class(&class.name)),
            );
            definitions.insert(camelcase(&class.name), JsonValue::Object(class_schema));
        }

        for enum_def in view.all_enums().values() {
            let mut enum_schema = Map::new();
            enum_schema.insert("title".to_string(), json!(camelcase(&enum_def.name)));
            if let Some(description) = &enum_def.description {
                enum_schema.insert("description".to_string(), json!(description));
            }
            enum_schema.insert("type".to_string(), json!("string"));
            enum_schema.insert(
                "enum".to_string(),
                json!(enum_def.value_texts().collect::<Vec<_>>()),
            );
            definitions.insert(camelcase(&enum_def.name), JsonValue::Object(enum_schema));
        }

        info!(
            schema = %schema.name,
            definitions = definitions.len(),
            top_class = ?self.options.top_class,
            "Generated JSON Schema"
        );

        Ok(json!({
            "$schema": DRAFT_07,
            "$id": schema.id,
            "$defs": definitions,
            "title": schema.name,
            "metamodel_version": schema.metamodel_version,
            "version": schema.version,
            "type": "object",
            "properties": root_properties,
            "required": root_required,
            "additionalProperties": self.options.not_closed,
        }))
    }

    /// Properties and required property names of a class
    fn class_properties(
        &self,
        view: &SchemaView,
        references: &ReferenceSlots,
        class_name: &str,
    ) -> GeneratorResult<(Map<String, JsonValue>, Vec<String>)> {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for slot_name in view.class_slots(class_name)? {
            let slot = view.induced_slot(&slot_name, class_name)?;
            let property_name = underscore(slot.aliased_name());
            let mut property = self.slot_property(view, &slot, class_name)?;

            if references.is_reference(&slot) {
                match property.get("type").and_then(JsonValue::as_str) {
                    Some("array") => allow_identifier_items(&mut property),
                    Some("object") => allow_identifier_list(&mut property),
                    _ => allow_identifier(&mut property),
                }
            }

            if slot.is_required() {
                required.push(property_name.clone());
            }
            properties.insert(property_name, JsonValue::Object(property));
        }

        Ok((properties, required))
    }

    /// Property schema for one induced slot, before reference relaxation
    fn slot_property(
        &self,
        view: &SchemaView,
        slot: &SlotDefinition,
        class_name: &str,
    ) -> GeneratorResult<Map<String, JsonValue>> {
        let mut keyed = false;
        let item = match slot.range.as_deref() {
            None => type_schema("string", None),
            Some(range) if view.get_class(range).is_some() => {
                let has_identifier = view.get_identifier_slot(range)?.is_some();
                if self.options.inline || slot.is_inlined() || !has_identifier {
                    keyed = has_identifier && !slot.is_inlined_as_list();
                    self.class_reference(view, range)?
                } else {
                    type_schema("string", None)
                }
            }
            Some(range) if view.get_enum(range).is_some() => ref_schema(range),
            Some(range) if view.is_type(range) => {
                let primitive = view.python_primitive(range).ok_or_else(|| {
                    GeneratorError::unresolvable(range, &slot.name, class_name)
                })?;
                let (json_type, format) = primitive.json_schema_type();
                let format = format.or_else(|| is_uri_type(view, range).then_some("uri"));
                type_schema(json_type, format)
            }
            Some(range) => {
                return Err(GeneratorError::unresolvable(range, &slot.name, class_name));
            }
        };

        let mut property = if !slot.is_multivalued() {
            item
        } else if keyed {
            let mut dict = type_schema("object", None);
            dict.insert("additionalProperties".to_string(), JsonValue::Object(item));
            dict
        } else {
            let mut array = type_schema("array", None);
            array.insert("items".to_string(), JsonValue::Object(item));
            array
        };

        if let Some(description) = &slot.description {
            property.insert("description".to_string(), json!(description));
        }
        if let Some(pattern) = &slot.pattern {
            property.insert("pattern".to_string(), json!(pattern));
        }
        if let Some(minimum) = &slot.minimum_value {
            property.insert("minimum".to_string(), minimum.clone());
        }
        if let Some(maximum) = &slot.maximum_value {
            property.insert("maximum".to_string(), maximum.clone());
        }

        debug!(class = class_name, slot = %slot.name, "Generated property schema");
        Ok(property)
    }

    /// `$ref` to the range class, or `oneOf` its concrete descendants
    fn class_reference(
        &self,
        view: &SchemaView,
        range: &str,
    ) -> GeneratorResult<Map<String, JsonValue>> {
        if self.options.include_range_class_descendants {
            let refs: Vec<JsonValue> = view
                .class_descendants(range)?
                .iter()
                .filter(|name| {
                    view.get_class(name)
                        .is_some_and(|class| !class.abstract_.unwrap_or(false))
                })
                .map(|name| JsonValue::Object(ref_schema(name)))
                .collect();
            if !refs.is_empty() {
                let mut one_of = Map::new();
                one_of.insert("oneOf".to_string(), JsonValue::Array(refs));
                return Ok(one_of);
            }
        }
        Ok(ref_schema(range))
    }
}

fn ref_schema(name: &str) -> Map<String, JsonValue> {
    let mut schema = Map::new();
    schema.insert(
        "$ref".to_string(),
        json!(format!("#/$defs/{}", camelcase(name))),
    );
    schema
}

fn type_schema(json_type: &str, format: Option<&str>) -> Map<String, JsonValue> {
    let mut schema = Map::new();
    schema.insert("type".to_string(), json!(json_type));
    if let Some(format) = format {
        schema.insert("format".to_string(), json!(format));
    }
    schema
}

/// Whether a type is, or derives from, the builtin `uri`
fn is_uri_type(view: &SchemaView, range: &str) -> bool {
    let mut visited = HashSet::new();
    let mut current = range;
    while visited.insert(current) {
        if current == "uri" {
            return true;
        }
        match view.get_type(current).and_then(|t| t.typeof_.as_deref()) {
            Some(parent) => current = parent,
            None => return false,
        }
    }
    false
}

/// Single-valued slot: accept the referenced object or its identifier
fn allow_identifier(property: &mut Map<String, JsonValue>) {
    if let Some(reference) = property.remove("$ref") {
        property.insert(
            "oneOf".to_string(),
            json!([{"$ref": reference}, {"type": "string"}]),
        );
    } else if let Some(JsonValue::Array(one_of)) = property.get_mut("oneOf") {
        one_of.push(json!({"type": "string"}));
    }
}

/// Multivalued slot: accept identifiers among the items
fn allow_identifier_items(property: &mut Map<String, JsonValue>) {
    let Some(JsonValue::Object(items)) = property.get_mut("items") else {
        return;
    };
    if let Some(reference) = items.remove("$ref") {
        items.insert(
            "oneOf".to_string(),
            json!([{"type": "string"}, {"$ref": reference}]),
        );
    } else if let Some(JsonValue::Array(one_of)) = items.get_mut("oneOf") {
        one_of.push(json!({"type": "string"}));
    }
}

/// Identifier-keyed collection: also accept a list of identifiers
fn allow_identifier_list(property: &mut Map<String, JsonValue>) {
    let description = property.remove("description");
    let keyed = std::mem::take(property);
    property.insert(
        "anyOf".to_string(),
        json!([keyed, {"type": "array", "items": {"type": "string"}}]),
    );
    if let Some(description) = description {
        property.insert("description".to_string(), description);
    }
}

impl JsonSchemaSource for JsonSchemaGenerator {
    fn json_schema(
        &self,
        schema: &SchemaDefinition,
        top_class: Option<&str>,
    ) -> GeneratorResult<JsonValue> {
        let options = JsonSchemaOptions {
            top_class: top_class.map(ToString::to_string),
            ..self.options.clone()
        };
        Self::with_options(options).generate_value(schema)
    }
}

impl Generator for JsonSchemaGenerator {
    fn name(&self) -> &str {
        "ghga-json-schema"
    }

    fn description(&self) -> &str {
        "Generate JSON Schema with relaxed reference slots"
    }

    fn generate(&self, schema: &SchemaDefinition) -> GeneratorResult<String> {
        self.validate_schema(schema)?;
        let value = self.generate_value(schema)?;
        Ok(serde_json::to_string_pretty(&value).map_err(LinkMLError::from)?)
    }

    fn get_file_extension(&self) -> &str {
        "json"
    }

    fn get_default_filename(&self) -> &str {
        "schema.json"
    }
}

//! Type-range resolution
//!
//! Decides, for every induced slot of every class, which type expression the
//! generated model uses. Reference slots are relaxed to also accept a bare
//! identifier, and ranges with subclasses become discriminated unions keyed
//! on `schema_type`.

use super::reference_slots::ReferenceSlots;
use super::traits::{GeneratorError, GeneratorResult};
use super::type_expr::TypeExpr;
use crate::schema_view::{ANY_CLASS_URI, SchemaView};
use indexmap::IndexMap;
use linkml_core::types::{EnumDefinition, SlotDefinition};
use linkml_core::utils::{camelcase, enum_label, underscore};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Field that discriminates the members of a union
pub const SCHEMA_TYPE: &str = "schema_type";

/// Discriminated union generated for a range class with subclasses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionDefinition {
    /// Generated alias name, e.g. `AnnotatedSample`
    pub name: String,
    /// Field carrying the discriminator literal
    pub discriminator_field: String,
    /// Member class names, most specific first
    pub members: Vec<String>,
}

/// A slot as it appears in the generated model
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSlot {
    /// Attribute name (underscored)
    pub name: String,
    /// Resolved type
    pub type_expr: TypeExpr,
    /// Whether a value must be present
    pub required: bool,
    /// Whether this is the `schema_type` discriminator
    pub is_discriminator: bool,
    /// Human-readable title
    pub title: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Inclusive lower bound
    pub minimum_value: Option<Value>,
    /// Inclusive upper bound
    pub maximum_value: Option<Value>,
}

/// A class as it appears in the generated model
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedClass {
    /// Generated name (camelcased)
    pub name: String,
    /// Name in the schema
    pub source_name: String,
    /// Generated name of the `is_a` parent
    pub parent: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Induced slots, own slots first
    pub attributes: Vec<ResolvedSlot>,
}

/// An enum as it appears in the generated model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnum {
    /// Generated name (camelcased)
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// `(member label, value text)` pairs in declaration order
    pub values: Vec<(String, String)>,
}

impl ResolvedEnum {
    fn from_definition(enum_def: &EnumDefinition) -> Self {
        Self {
            name: camelcase(&enum_def.name),
            description: enum_def.description.clone(),
            values: enum_def
                .value_texts()
                .map(|text| (enum_label(text), text.to_string()))
                .collect(),
        }
    }
}

/// Result of a resolution pass over a whole schema
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    /// Schema name
    pub name: String,
    /// Schema id
    pub id: String,
    /// Schema description
    pub description: Option<String>,
    /// Schema version
    pub version: Option<String>,
    /// Metamodel version
    pub metamodel_version: Option<String>,
    /// Enums in declaration order
    pub enums: Vec<ResolvedEnum>,
    /// Classes with parents first
    pub classes: Vec<ResolvedClass>,
    /// Unions in creation order
    pub unions: IndexMap<String, UnionDefinition>,
}

/// Resolves slot ranges to type expressions.
///
/// One resolver serves one generation run: the reference-slot set is fixed at
/// construction and the union registry only grows.
#[derive(Debug, Clone)]
pub struct RangeResolver {
    reference_slots: ReferenceSlots,
    unions: IndexMap<String, UnionDefinition>,
}

impl RangeResolver {
    /// Create a resolver for the schema behind `view`
    #[must_use]
    pub fn new(view: &SchemaView) -> Self {
        let reference_slots = ReferenceSlots::from_view(view);
        debug!(count = reference_slots.len(), "Collected reference slots");
        Self {
            reference_slots,
            unions: IndexMap::new(),
        }
    }

    /// Reference slots of the schema
    #[must_use]
    pub fn reference_slots(&self) -> &ReferenceSlots {
        &self.reference_slots
    }

    /// Unions created so far
    #[must_use]
    pub fn unions(&self) -> &IndexMap<String, UnionDefinition> {
        &self.unions
    }

    /// Resolve the type of an induced `slot` of `owning_class`.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::UnresolvableRange` if the range is not a
    /// class, enum or type of the schema, or if a type's primitive cannot be
    /// determined.
    pub fn resolve(
        &mut self,
        slot: &SlotDefinition,
        owning_class: &str,
        view: &SchemaView,
    ) -> GeneratorResult<TypeExpr> {
        let slot_name = underscore(&slot.name);
        let is_discriminator = slot_name == SCHEMA_TYPE;
        let mut keyed = false;

        let mut expr = if is_discriminator {
            TypeExpr::Literal(camelcase(owning_class))
        } else {
            match slot.range.as_deref() {
                None => TypeExpr::string(),
                Some(range) if view.get_class(range).is_some() => {
                    let (expr, collection_key) = self.resolve_class_range(slot, range, view)?;
                    keyed = collection_key;
                    expr
                }
                Some(range) if view.get_enum(range).is_some() => TypeExpr::named(camelcase(range)),
                Some(range) if view.is_type(range) => view
                    .python_primitive(range)
                    .map(TypeExpr::Primitive)
                    .ok_or_else(|| GeneratorError::unresolvable(range, &slot.name, owning_class))?,
                Some(range) => {
                    return Err(GeneratorError::unresolvable(
                        range,
                        &slot.name,
                        owning_class,
                    ));
                }
            }
        };

        if slot.is_multivalued() {
            expr = if keyed {
                expr.keyed_by_string()
            } else {
                expr.sequence()
            };
        }

        if self.reference_slots.is_reference(slot) && !expr.is_string() && !expr.is_string_sequence()
        {
            let identifier = if slot.is_multivalued() {
                TypeExpr::string().sequence()
            } else {
                TypeExpr::string()
            };
            expr = expr.or(identifier);
        }

        if !slot.is_required() && !is_discriminator {
            expr = expr.optional();
        }

        debug!(class = owning_class, slot = %slot_name, type_expr = %expr, "Resolved slot range");
        Ok(expr)
    }

    /// Embedded ranges become the class or a union of its descendants; ranges
    /// referenced by identifier become `str`. The flag tells whether a
    /// multivalued slot is keyed by identifier.
    fn resolve_class_range(
        &mut self,
        slot: &SlotDefinition,
        range: &str,
        view: &SchemaView,
    ) -> GeneratorResult<(TypeExpr, bool)> {
        if view.is_any_class(range) {
            return Ok((TypeExpr::Any, false));
        }

        let identifier = view.get_identifier_slot(range)?;
        if !slot.is_inlined() && identifier.is_some() {
            return Ok((TypeExpr::string(), false));
        }

        let descendants = view.class_descendants(range)?;
        let members: Vec<String> = descendants.iter().rev().map(|d| camelcase(d)).collect();
        let expr = match members.as_slice() {
            [single] => TypeExpr::named(single.clone()),
            _ => TypeExpr::named(self.register_union(range, members)),
        };

        Ok((expr, identifier.is_some() && !slot.is_inlined_as_list()))
    }

    fn register_union(&mut self, topmost: &str, members: Vec<String>) -> String {
        let name = camelcase(&format!("annotated {topmost}"));
        self.unions.entry(name.clone()).or_insert_with(|| {
            debug!(union = %name, members = ?members, "Created discriminated union");
            UnionDefinition {
                name: name.clone(),
                discriminator_field: SCHEMA_TYPE.to_string(),
                members,
            }
        });
        name
    }

    /// Resolve every slot of every class of the schema.
    ///
    /// Classes whose `class_uri` is `linkml:Any` are skipped.
    ///
    /// # Errors
    ///
    /// Fails on the first unresolvable range.
    pub fn resolve_schema(&mut self, view: &SchemaView) -> GeneratorResult<ResolvedSchema> {
        let schema = view.schema();
        info!(schema = %schema.name, "Resolving slot ranges");

        let enums = view
            .all_enums()
            .values()
            .map(ResolvedEnum::from_definition)
            .collect();

        let mut classes = Vec::new();
        for class in view.sorted_classes()? {
            if class.class_uri.as_deref() == Some(ANY_CLASS_URI) {
                continue;
            }

            let mut attributes = Vec::new();
            for slot_name in view.class_slots(&class.name)? {
                let slot = view.induced_slot(&slot_name, &class.name)?;
                let type_expr = self.resolve(&slot, &class.name, view)?;
                let name = underscore(&slot.name);
                attributes.push(ResolvedSlot {
                    is_discriminator: name == SCHEMA_TYPE,
                    name,
                    type_expr,
                    required: slot.is_required(),
                    title: slot.title,
                    description: slot.description,
                    minimum_value: slot.minimum_value,
                    maximum_value: slot.maximum_value,
                });
            }

            classes.push(ResolvedClass {
                name: camelcase(&class.name),
                source_name: class.name.clone(),
                parent: class.is_a.as_deref().map(camelcase),
                description: class.description.clone(),
                attributes,
            });
        }

        info!(
            classes = classes.len(),
            unions = self.unions.len(),
            "Resolved schema"
        );

        Ok(ResolvedSchema {
            name: schema.name.clone(),
            id: schema.id.clone(),
            description: schema.description.clone(),
            version: schema.version.clone(),
            metamodel_version: schema.metamodel_version.clone(),
            enums,
            classes,
            unions: self.unions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_schema_str;
    use pretty_assertions::assert_eq;

    const SCHEMA: &str = r"
id: https://w3id.org/resolver-test
name: resolver-test
classes:
  named thing:
    slots:
      - id
      - schema_type
  Sample:
    is_a: named thing
    slots:
      - has individual
      - has files
      - tags
  Tumor Sample:
    is_a: Sample
  Individual:
    is_a: named thing
  File:
    slots:
      - name
  Any:
    class_uri: linkml:Any
slots:
  id:
    identifier: true
    required: true
  schema_type: {}
  name:
    required: true
  has individual:
    range: Individual
  has files:
    range: File
    multivalued: true
  tags:
    range: Mystery
";

    fn view() -> SchemaView {
        let mut schema = parse_schema_str(SCHEMA).expect("valid yaml");
        schema.slots.shift_remove("tags");
        schema.classes["Sample"].slots.pop();
        SchemaView::new(schema).expect("valid schema")
    }

    fn resolve(slot: &str, class: &str) -> GeneratorResult<String> {
        let view = view();
        let mut resolver = RangeResolver::new(&view);
        let induced = view.induced_slot(slot, class)?;
        Ok(resolver.resolve(&induced, class, &view)?.to_string())
    }

    #[test]
    fn test_schema_type_is_bare_literal() {
        assert_eq!(
            resolve("schema_type", "Tumor Sample").expect("resolves"),
            "Literal[\"TumorSample\"]"
        );
    }

    #[test]
    fn test_identified_range_is_relaxed_reference() {
        // Individual has an identifier and the slot is not inlined: plain str.
        assert_eq!(
            resolve("has individual", "Sample").expect("resolves"),
            "Optional[str]"
        );
    }

    #[test]
    fn test_identifier_less_range_is_embedded_and_relaxed() {
        assert_eq!(
            resolve("has files", "Sample").expect("resolves"),
            "Optional[Union[List[File], List[str]]]"
        );
    }

    #[test]
    fn test_unknown_range_fails() {
        let schema = parse_schema_str(SCHEMA).expect("valid yaml");
        let view = SchemaView::new(schema).expect("valid schema");
        let mut resolver = RangeResolver::new(&view);
        let err = resolver.resolve_schema(&view).expect_err("Mystery is unknown");
        assert!(matches!(
            err,
            GeneratorError::UnresolvableRange { ref range, ref class, .. }
                if range == "Mystery" && class == "Sample"
        ));
    }

    #[test]
    fn test_resolve_schema_skips_any_and_orders_parents_first() {
        let view = view();
        let mut resolver = RangeResolver::new(&view);
        let resolved = resolver.resolve_schema(&view).expect("resolves");
        let names: Vec<&str> = resolved.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["NamedThing", "Sample", "TumorSample", "Individual", "File"]
        );
        let tumor = &resolved.classes[2];
        assert_eq!(tumor.parent.as_deref(), Some("Sample"));
        let attrs: Vec<&str> = tumor.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            attrs,
            vec!["has_individual", "has_files", "id", "schema_type"]
        );
        assert!(tumor.attributes[3].is_discriminator);
        assert!(resolved.unions.is_empty());
    }
}

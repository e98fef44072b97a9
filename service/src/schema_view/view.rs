//! `SchemaView` - read-only introspection over a `LinkML` schema

use super::primitives::{PrimitiveType, base_primitive, builtin_primitive};
use indexmap::IndexMap;
use linkml_core::error::{LinkMLError, Result};
use linkml_core::types::{
    ClassDefinition, EnumDefinition, SchemaDefinition, SlotDefinition, TypeDefinition,
};
use std::collections::HashSet;

/// Class URI that marks the `linkml:Any` wildcard class
pub const ANY_CLASS_URI: &str = "linkml:Any";

/// Read-only view answering inheritance and slot induction questions.
///
/// Construction validates that every `is_a` and mixin names a known class and
/// that the class hierarchy is acyclic, so the traversals below never need to
/// guard against either.
#[derive(Debug, Clone)]
pub struct SchemaView {
    schema: SchemaDefinition,
}

impl SchemaView {
    /// Create a view over `schema`
    ///
    /// # Errors
    ///
    /// Returns `LinkMLError::SchemaValidationError` if a class names an
    /// unknown parent or mixin, or if inheritance is circular.
    pub fn new(mut schema: SchemaDefinition) -> Result<Self> {
        schema.normalize_names();

        for class in schema.classes.values() {
            for parent in class.is_a.iter().chain(&class.mixins) {
                if !schema.classes.contains_key(parent) {
                    return Err(LinkMLError::schema_element(
                        format!("Class '{}' inherits from unknown class '{parent}'", class.name),
                        class.name.clone(),
                    ));
                }
            }
        }

        let view = Self { schema };
        view.sorted_class_names()?;
        Ok(view)
    }

    /// The underlying schema
    #[must_use]
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// All classes in declaration order
    #[must_use]
    pub fn all_classes(&self) -> &IndexMap<String, ClassDefinition> {
        &self.schema.classes
    }

    /// Look up a class by name
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&ClassDefinition> {
        self.schema.classes.get(name)
    }

    /// All enums in declaration order
    #[must_use]
    pub fn all_enums(&self) -> &IndexMap<String, EnumDefinition> {
        &self.schema.enums
    }

    /// Look up an enum by name
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDefinition> {
        self.schema.enums.get(name)
    }

    /// Look up a declared type by name
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.schema.types.get(name)
    }

    /// Whether `name` is a declared or builtin type
    #[must_use]
    pub fn is_type(&self, name: &str) -> bool {
        self.schema.types.contains_key(name) || builtin_primitive(name).is_some()
    }

    /// Top-level slots followed by class attributes not already declared
    #[must_use]
    pub fn all_slots(&self) -> Vec<&SlotDefinition> {
        let mut seen: HashSet<&str> = self.schema.slots.keys().map(String::as_str).collect();
        let mut slots: Vec<&SlotDefinition> = self.schema.slots.values().collect();
        for class in self.schema.classes.values() {
            for (name, attribute) in &class.attributes {
                if seen.insert(name.as_str()) {
                    slots.push(attribute);
                }
            }
        }
        slots
    }

    /// Direct parents: `is_a` first, then mixins
    #[must_use]
    pub fn class_parents(&self, class_name: &str) -> Vec<String> {
        self.get_class(class_name)
            .map(|class| class.is_a.iter().chain(&class.mixins).cloned().collect())
            .unwrap_or_default()
    }

    /// Direct `is_a` children in declaration order
    #[must_use]
    pub fn class_children(&self, class_name: &str) -> Vec<String> {
        self.schema
            .classes
            .values()
            .filter(|class| class.is_a.as_deref() == Some(class_name))
            .map(|class| class.name.clone())
            .collect()
    }

    /// The class itself followed by all of its ancestors
    ///
    /// # Errors
    ///
    /// Returns an error if the class does not exist.
    pub fn class_ancestors(&self, class_name: &str) -> Result<Vec<String>> {
        self.require_class(class_name)?;
        Ok(closure(class_name, |name| self.class_parents(name)))
    }

    /// The class itself followed by all of its `is_a` descendants
    ///
    /// # Errors
    ///
    /// Returns an error if the class does not exist.
    pub fn class_descendants(&self, class_name: &str) -> Result<Vec<String>> {
        self.require_class(class_name)?;
        Ok(closure(class_name, |name| self.class_children(name)))
    }

    /// Names of all slots applicable to a class, own slots first
    ///
    /// # Errors
    ///
    /// Returns an error if the class does not exist.
    pub fn class_slots(&self, class_name: &str) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut slots = Vec::new();
        for ancestor in self.class_ancestors(class_name)? {
            let class = self.require_class(&ancestor)?;
            for slot_name in class.slots.iter().chain(class.attributes.keys()) {
                if seen.insert(slot_name.clone()) {
                    slots.push(slot_name.clone());
                }
            }
        }
        Ok(slots)
    }

    /// The slot as it applies to `class_name`, with inheritance flattened.
    ///
    /// Attributes shadow top-level slots. Missing metaslots come from the
    /// slot's own `is_a` chain; `slot_usage` is applied from the farthest
    /// ancestor down to the class itself, and `default_range` fills a range
    /// that is still absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the class or the slot does not exist.
    pub fn induced_slot(&self, slot_name: &str, class_name: &str) -> Result<SlotDefinition> {
        let ancestors = self.class_ancestors(class_name)?;

        let attribute = ancestors
            .iter()
            .filter_map(|name| self.get_class(name))
            .find_map(|class| class.attributes.get(slot_name));
        let mut slot = attribute
            .or_else(|| self.schema.slots.get(slot_name))
            .cloned()
            .ok_or_else(|| {
                LinkMLError::schema_element(
                    format!("Slot '{slot_name}' not found for class '{class_name}'"),
                    slot_name,
                )
            })?;
        slot.name = slot_name.to_string();

        let mut visited = HashSet::from([slot_name.to_string()]);
        let mut parent_name = slot.is_a.clone();
        while let Some(name) = parent_name.take() {
            if !visited.insert(name.clone()) {
                break;
            }
            let Some(parent) = self.schema.slots.get(&name) else {
                break;
            };
            slot.inherit_from(parent);
            parent_name.clone_from(&parent.is_a);
        }

        for ancestor in ancestors.iter().rev() {
            if let Some(usage) = self
                .get_class(ancestor)
                .and_then(|class| class.slot_usage.get(slot_name))
            {
                slot.apply_usage(usage);
            }
        }

        if slot.range.is_none() {
            slot.range.clone_from(&self.schema.default_range);
        }
        Ok(slot)
    }

    /// The first induced slot of a class marked `identifier`
    ///
    /// # Errors
    ///
    /// Returns an error if the class does not exist.
    pub fn get_identifier_slot(&self, class_name: &str) -> Result<Option<SlotDefinition>> {
        for slot_name in self.class_slots(class_name)? {
            let slot = self.induced_slot(&slot_name, class_name)?;
            if slot.is_identifier() {
                return Ok(Some(slot));
            }
        }
        Ok(None)
    }

    /// Whether the class is the `linkml:Any` wildcard
    #[must_use]
    pub fn is_any_class(&self, class_name: &str) -> bool {
        self.get_class(class_name)
            .is_some_and(|class| class.class_uri.as_deref() == Some(ANY_CLASS_URI))
    }

    /// Classes ordered so that parents and mixins precede their children
    ///
    /// # Errors
    ///
    /// Returns an error if inheritance is circular.
    pub fn sorted_classes(&self) -> Result<Vec<&ClassDefinition>> {
        Ok(self
            .sorted_class_names()?
            .iter()
            .filter_map(|name| self.get_class(name))
            .collect())
    }

    /// Python primitive a type name resolves to.
    ///
    /// Declared types shadow builtins. `None` means the name is not a type,
    /// its `typeof` chain dangles, or the chain is circular.
    #[must_use]
    pub fn python_primitive(&self, type_name: &str) -> Option<PrimitiveType> {
        let mut visited = HashSet::new();
        let mut current = type_name;
        loop {
            let Some(type_def) = self.get_type(current) else {
                return builtin_primitive(current);
            };
            if !visited.insert(current) {
                return None;
            }
            match type_def.base.as_deref() {
                Some("XSDDate") => return Some(PrimitiveType::Date),
                Some("XSDDateTime") => return Some(PrimitiveType::DateTime),
                _ => {}
            }
            if let Some(repr) = type_def.repr.as_deref().or(type_def.base.as_deref()) {
                return Some(base_primitive(repr));
            }
            current = type_def.typeof_.as_deref()?;
        }
    }

    fn require_class(&self, class_name: &str) -> Result<&ClassDefinition> {
        self.get_class(class_name).ok_or_else(|| {
            LinkMLError::schema_element(format!("Class '{class_name}' not found"), class_name)
        })
    }

    fn sorted_class_names(&self) -> Result<Vec<String>> {
        let mut sorted = Vec::new();
        let mut visited = HashSet::new();
        let mut visiting = HashSet::new();

        for class_name in self.schema.classes.keys() {
            self.visit(class_name, &mut sorted, &mut visited, &mut visiting)?;
        }

        Ok(sorted)
    }

    fn visit(
        &self,
        name: &str,
        sorted: &mut Vec<String>,
        visited: &mut HashSet<String>,
        visiting: &mut HashSet<String>,
    ) -> Result<()> {
        if visited.contains(name) {
            return Ok(());
        }

        if !visiting.insert(name.to_string()) {
            return Err(LinkMLError::schema_element(
                format!("Circular inheritance detected at: {name}"),
                name,
            ));
        }

        for parent in self.class_parents(name) {
            self.visit(&parent, sorted, visited, visiting)?;
        }

        visiting.remove(name);
        visited.insert(name.to_string());
        sorted.push(name.to_string());

        Ok(())
    }
}

/// Reflexive transitive closure in `LinkML` order: a depth-first stack,
/// results in discovery order.
fn closure<F>(start: &str, next: F) -> Vec<String>
where
    F: Fn(&str) -> Vec<String>,
{
    let mut result = vec![start.to_string()];
    let mut visited = HashSet::new();
    let mut todo = vec![start.to_string()];

    while let Some(current) = todo.pop() {
        visited.insert(current.clone());
        for candidate in next(&current) {
            if !visited.contains(&candidate) && !result.contains(&candidate) {
                todo.push(candidate.clone());
                result.push(candidate);
            }
        }
    }

    result
}

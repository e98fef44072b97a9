//! Core type definitions for LinkML schemas

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema definition - the root of a `LinkML` schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaDefinition {
    /// Unique identifier for the schema
    #[serde(default)]
    pub id: String,

    /// Name of the schema
    #[serde(default)]
    pub name: String,

    /// Human-readable title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Version of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// License information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Default prefix for the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prefix: Option<String>,

    /// Prefix declarations
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub prefixes: IndexMap<String, PrefixDefinition>,

    /// Import statements (recorded, never resolved)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    /// Class definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub classes: IndexMap<String, ClassDefinition>,

    /// Slot definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub slots: IndexMap<String, SlotDefinition>,

    /// Type definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub types: IndexMap<String, TypeDefinition>,

    /// Enum definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub enums: IndexMap<String, EnumDefinition>,

    /// Default range for slots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,

    /// Source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Metamodel version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metamodel_version: Option<String>,
}

/// Prefix declaration, either `prefix: uri` or the expanded form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PrefixDefinition {
    /// Simple URI expansion
    Simple(String),
    /// Expanded definition
    Complex {
        /// Prefix name
        prefix_prefix: String,
        /// URI the prefix expands to
        prefix_reference: Option<String>,
    },
}

/// Class definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassDefinition {
    /// Name of the class
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Human-readable title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Is this class abstract?
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<bool>,

    /// Is this a mixin?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixin: Option<bool>,

    /// Parent class (single inheritance)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,

    /// Mixin classes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,

    /// Slots used by this class
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<String>,

    /// Slot usage overrides
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub slot_usage: IndexMap<String, SlotDefinition>,

    /// Attributes (inline slots)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, SlotDefinition>,

    /// Class URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_uri: Option<String>,

    /// Tree root flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_root: Option<bool>,
}

/// Slot definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotDefinition {
    /// Name of the slot
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Human-readable title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Name used in generated artifacts instead of `name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Range (type) of the slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Is this slot required?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Is this slot multivalued?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multivalued: Option<bool>,

    /// Is this slot an identifier?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<bool>,

    /// Is this slot a key (unique within its container)?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<bool>,

    /// Embed the range object instead of referencing it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inlined: Option<bool>,

    /// Embed as a list even if the range has an identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inlined_as_list: Option<bool>,

    /// Pattern for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Minimum value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_value: Option<Value>,

    /// Maximum value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_value: Option<Value>,

    /// Parent slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,

    /// Mixin slots
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,

    /// Domain class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Slot URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_uri: Option<String>,
}

/// Type definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeDefinition {
    /// Name of the type
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parent type
    #[serde(skip_serializing_if = "Option::is_none", rename = "typeof")]
    pub typeof_: Option<String>,

    /// Python base class name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Python representation type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repr: Option<String>,

    /// Type URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Pattern constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Enum definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnumDefinition {
    /// Name of the enum
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Permissible values keyed by their text
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub permissible_values: IndexMap<String, Option<PermissibleValue>>,
}

/// Metadata of one permissible value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PermissibleValue {
    /// Text, when it differs from the mapping key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ontology term this value stands for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl SchemaDefinition {
    /// Create a new schema definition
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: format!("https://w3id.org/{name}"),
            name,
            ..Default::default()
        }
    }

    /// Fill empty element names from their mapping keys.
    ///
    /// Schemas written in YAML only carry names as keys, so this runs after
    /// every deserialization.
    pub fn normalize_names(&mut self) {
        for (key, class) in &mut self.classes {
            if class.name.is_empty() {
                class.name.clone_from(key);
            }
            for (attr_key, attr) in &mut class.attributes {
                if attr.name.is_empty() {
                    attr.name.clone_from(attr_key);
                }
            }
            for (usage_key, usage) in &mut class.slot_usage {
                if usage.name.is_empty() {
                    usage.name.clone_from(usage_key);
                }
            }
        }
        for (key, slot) in &mut self.slots {
            if slot.name.is_empty() {
                slot.name.clone_from(key);
            }
        }
        for (key, type_def) in &mut self.types {
            if type_def.name.is_empty() {
                type_def.name.clone_from(key);
            }
        }
        for (key, enum_def) in &mut self.enums {
            if enum_def.name.is_empty() {
                enum_def.name.clone_from(key);
            }
        }
    }
}

impl ClassDefinition {
    /// Create a new class definition
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl SlotDefinition {
    /// Create a new slot definition
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Name used in generated artifacts: the alias if set, else the name
    #[must_use]
    pub fn aliased_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Whether the slot is required
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Whether the slot is multivalued
    #[must_use]
    pub fn is_multivalued(&self) -> bool {
        self.multivalued.unwrap_or(false)
    }

    /// Whether the slot embeds its range
    #[must_use]
    pub fn is_inlined(&self) -> bool {
        self.inlined.unwrap_or(false)
    }

    /// Whether the slot embeds its range as a list
    #[must_use]
    pub fn is_inlined_as_list(&self) -> bool {
        self.inlined_as_list.unwrap_or(false)
    }

    /// Whether the slot identifies its owning object
    #[must_use]
    pub fn is_identifier(&self) -> bool {
        self.identifier.unwrap_or(false)
    }

    /// Fill every unset metaslot from `parent`.
    ///
    /// Identity (`name`, `alias`, `is_a`) is never inherited.
    pub fn inherit_from(&mut self, parent: &SlotDefinition) {
        fill(&mut self.description, &parent.description);
        fill(&mut self.title, &parent.title);
        fill(&mut self.range, &parent.range);
        fill(&mut self.required, &parent.required);
        fill(&mut self.multivalued, &parent.multivalued);
        fill(&mut self.identifier, &parent.identifier);
        fill(&mut self.key, &parent.key);
        fill(&mut self.inlined, &parent.inlined);
        fill(&mut self.inlined_as_list, &parent.inlined_as_list);
        fill(&mut self.pattern, &parent.pattern);
        fill(&mut self.minimum_value, &parent.minimum_value);
        fill(&mut self.maximum_value, &parent.maximum_value);
        fill(&mut self.domain, &parent.domain);
        fill(&mut self.slot_uri, &parent.slot_uri);
    }

    /// Override metaslots with every value `usage` sets
    pub fn apply_usage(&mut self, usage: &SlotDefinition) {
        replace(&mut self.description, &usage.description);
        replace(&mut self.title, &usage.title);
        replace(&mut self.alias, &usage.alias);
        replace(&mut self.range, &usage.range);
        replace(&mut self.required, &usage.required);
        replace(&mut self.multivalued, &usage.multivalued);
        replace(&mut self.identifier, &usage.identifier);
        replace(&mut self.key, &usage.key);
        replace(&mut self.inlined, &usage.inlined);
        replace(&mut self.inlined_as_list, &usage.inlined_as_list);
        replace(&mut self.pattern, &usage.pattern);
        replace(&mut self.minimum_value, &usage.minimum_value);
        replace(&mut self.maximum_value, &usage.maximum_value);
    }
}

fn fill<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if target.is_none() {
        target.clone_from(source);
    }
}

fn replace<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if source.is_some() {
        target.clone_from(source);
    }
}

impl TypeDefinition {
    /// Create a new type definition
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl EnumDefinition {
    /// Create a new enum definition
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a permissible value without metadata
    #[must_use]
    pub fn with_value(mut self, text: impl Into<String>) -> Self {
        self.permissible_values.insert(text.into(), None);
        self
    }

    /// Texts of all permissible values in declaration order
    pub fn value_texts(&self) -> impl Iterator<Item = &str> {
        self.permissible_values.iter().map(|(key, value)| {
            value
                .as_ref()
                .and_then(|pv| pv.text.as_deref())
                .unwrap_or(key.as_str())
        })
    }
}

//! Reference slots: slots pointing at another entity that also accept a bare
//! identifier string in place of the embedded object.

use crate::schema_view::SchemaView;
use linkml_core::types::SlotDefinition;
use linkml_core::utils::underscore;
use std::collections::HashSet;

/// Prefix marking a possessive relation
pub const REFERENCE_PREFIX: &str = "has_";

/// Reference slot that does not follow the prefix convention
pub const MAIN_CONTACT: &str = "main_contact";

/// Prefixed slots that hold values rather than references
pub const NON_REFERENCE_SLOTS: [&str; 3] =
    ["has_attribute", "has_parameter", "has_data_use_condition"];

/// Normalized name of a slot: its alias or name, underscored
#[must_use]
pub fn normalized_name(slot: &SlotDefinition) -> String {
    underscore(slot.aliased_name())
}

/// Whether a normalized slot name follows the reference convention
#[must_use]
pub fn is_reference_name(name: &str) -> bool {
    (name.starts_with(REFERENCE_PREFIX) || name == MAIN_CONTACT)
        && !NON_REFERENCE_SLOTS.contains(&name)
}

/// Normalized names of every reference slot in a schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSlots {
    names: HashSet<String>,
}

impl ReferenceSlots {
    /// Collect the reference slots among all slots of `view`
    #[must_use]
    pub fn from_view(view: &SchemaView) -> Self {
        Self::from_slots(view.all_slots())
    }

    /// Collect the reference slots among `slots`
    pub fn from_slots<'a>(slots: impl IntoIterator<Item = &'a SlotDefinition>) -> Self {
        let names = slots
            .into_iter()
            .map(normalized_name)
            .filter(|name| is_reference_name(name))
            .collect();
        Self { names }
    }

    /// Whether the normalized `name` is a reference slot
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether `slot` is a reference slot
    #[must_use]
    pub fn is_reference(&self, slot: &SlotDefinition) -> bool {
        self.contains(&normalized_name(slot))
    }

    /// Number of reference slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no slot qualifies
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

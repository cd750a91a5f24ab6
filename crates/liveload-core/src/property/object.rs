use indexmap::IndexMap;

use super::{Property, PropertyDescriptor};
use crate::value::Value;

/// An ordinary object: ordered own properties plus an extensible flag
#[derive(Debug, Clone, PartialEq)]
pub struct PlainObject {
    properties: IndexMap<String, Property>,
    extensible: bool,
}

impl Default for PlainObject {
    fn default() -> Self {
        Self {
            properties: IndexMap::new(),
            extensible: true,
        }
    }
}

impl PlainObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_own_property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    pub fn has_own_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Own keys in insertion order
    pub fn keys(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }

    pub fn is_extensible(&self) -> bool {
        self.extensible
    }

    pub fn prevent_extensions(&mut self) {
        self.extensible = false;
    }

    /// Validate `desc` against the current property and apply it
    ///
    /// Returns `false` and leaves the object untouched when the change is not
    /// permitted.
    pub(crate) fn define_own_property(&mut self, key: &str, desc: PropertyDescriptor) -> bool {
        if !self.properties.contains_key(key) {
            if !self.extensible {
                return false;
            }
            self.properties
                .insert(key.to_string(), Property::from_descriptor(desc));
            return true;
        }

        let Some(current) = self.properties.get_mut(key) else {
            return false;
        };
        if !desc.has_fields() {
            return true;
        }
        if !current.accepts(&desc) {
            return false;
        }
        current.apply(desc);
        true
    }

    pub(crate) fn get(&self, key: &str) -> Value {
        self.properties
            .get(key)
            .map(|p| p.value.clone())
            .unwrap_or_default()
    }

    pub(crate) fn delete(&mut self, key: &str) -> bool {
        match self.properties.get(key) {
            None => true,
            Some(p) if p.configurable => {
                self.properties.shift_remove(key);
                true
            }
            Some(_) => false,
        }
    }
}

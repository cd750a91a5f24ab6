use crate::value::Value;

/// A possibly partial property descriptor
///
/// Absent fields mean "leave as is" when redefining, and take their default
/// (`undefined` / `false`) when the property is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDescriptor {
    pub value: Option<Value>,
    pub writable: Option<bool>,
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully populated, writable, enumerable, configurable data descriptor
    pub fn data(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            writable: Some(true),
            enumerable: Some(true),
            configurable: Some(true),
        }
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = Some(writable);
        self
    }

    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = Some(enumerable);
        self
    }

    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = Some(configurable);
        self
    }

    pub fn has_fields(&self) -> bool {
        self.value.is_some()
            || self.writable.is_some()
            || self.enumerable.is_some()
            || self.configurable.is_some()
    }
}

/// The stored, fully populated attributes of an own property
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub value: Value,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Property {
    pub(crate) fn from_descriptor(desc: PropertyDescriptor) -> Self {
        Self {
            value: desc.value.unwrap_or_default(),
            writable: desc.writable.unwrap_or(false),
            enumerable: desc.enumerable.unwrap_or(false),
            configurable: desc.configurable.unwrap_or(false),
        }
    }

    pub fn to_descriptor(&self) -> PropertyDescriptor {
        PropertyDescriptor {
            value: Some(self.value.clone()),
            writable: Some(self.writable),
            enumerable: Some(self.enumerable),
            configurable: Some(self.configurable),
        }
    }

    /// Whether applying `desc` is allowed given the current attributes
    pub(crate) fn accepts(&self, desc: &PropertyDescriptor) -> bool {
        if self.configurable {
            return true;
        }
        if desc.configurable == Some(true) {
            return false;
        }
        if matches!(desc.enumerable, Some(e) if e != self.enumerable) {
            return false;
        }
        if !self.writable {
            if desc.writable == Some(true) {
                return false;
            }
            if matches!(&desc.value, Some(v) if !v.same_value(&self.value)) {
                return false;
            }
        }
        true
    }

    pub(crate) fn apply(&mut self, desc: PropertyDescriptor) {
        if let Some(value) = desc.value {
            self.value = value;
        }
        if let Some(writable) = desc.writable {
            self.writable = writable;
        }
        if let Some(enumerable) = desc.enumerable {
            self.enumerable = enumerable;
        }
        if let Some(configurable) = desc.configurable {
            self.configurable = configurable;
        }
    }
}

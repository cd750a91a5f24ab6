use std::sync::{Arc, PoisonError, RwLock};

use crate::value::Value;

/// Shared mutable storage slot owned by a module
///
/// Cloning a `LiveCell` produces another alias to the same slot. Every alias
/// observes writes made through any other alias, including writes made after
/// the alias was created.
#[derive(Debug, Clone, Default)]
pub struct LiveCell(Arc<RwLock<Value>>);

impl LiveCell {
    pub fn new(initial: impl Into<Value>) -> Self {
        LiveCell(Arc::new(RwLock::new(initial.into())))
    }

    /// Read the current value
    pub fn get(&self) -> Value {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current value
    pub fn set(&self, value: impl Into<Value>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = value.into();
    }

    /// Mutate the value in place under a single write lock
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Value),
    {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }

    /// True when both cells are aliases of the same slot
    pub fn ptr_eq(&self, other: &LiveCell) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A named, read-only live reference into one cell of a module record
#[derive(Debug, Clone)]
pub struct Binding {
    specifier: String,
    name: String,
    cell: LiveCell,
}

impl Binding {
    pub(crate) fn new(specifier: &str, name: &str, cell: LiveCell) -> Self {
        Self {
            specifier: specifier.to_string(),
            name: name.to_string(),
            cell,
        }
    }

    /// Read through to the module's storage
    pub fn get(&self) -> Value {
        self.cell.get()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    /// True when both bindings read the same underlying cell
    pub fn aliases(&self, other: &Binding) -> bool {
        self.cell.ptr_eq(&other.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_is_alias_not_copy() {
        let cell = LiveCell::new(3);
        let alias = cell.clone();

        cell.set(10);

        assert_eq!(alias.get(), Value::from(10));
        assert!(alias.ptr_eq(&cell));
    }

    #[test]
    fn test_binding_sees_later_writes() {
        let cell = LiveCell::new("before");
        let binding = Binding::new("mod.js", "label", cell.clone());

        cell.update(|v| *v = Value::from("after"));

        assert_eq!(binding.get(), Value::from("after"));
    }

    #[test]
    fn test_independent_cells_do_not_alias() {
        let a = LiveCell::new(1);
        let b = LiveCell::new(1);
        assert!(!a.ptr_eq(&b));
    }
}

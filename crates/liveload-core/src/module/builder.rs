use indexmap::map::Entry;
use indexmap::IndexMap;
use std::sync::Arc;

use super::{Export, InitError, LiveCell, ModuleRecord};
use crate::value::Value;

/// Collects the cells and exports a module body declares
///
/// A module body receives a builder, allocates its internal cells, and
/// exports some of them by name. Functions registered with [`export_fn`]
/// should capture clones of the cells they mutate so that every importer
/// sees the change.
///
/// [`export_fn`]: ModuleBuilder::export_fn
pub struct ModuleBuilder {
    specifier: String,
    exports: IndexMap<String, Export>,
}

impl ModuleBuilder {
    pub fn new(specifier: &str) -> Self {
        Self {
            specifier: specifier.to_string(),
            exports: IndexMap::new(),
        }
    }

    /// Specifier of the module being initialized
    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    /// Allocate a storage cell owned by this module
    pub fn cell(&self, initial: impl Into<Value>) -> LiveCell {
        LiveCell::new(initial)
    }

    /// Export a cell under `name`; importers alias the same cell
    pub fn export_value(&mut self, name: &str, cell: &LiveCell) -> Result<(), InitError> {
        self.insert(name, Export::Value(cell.clone()))
    }

    /// Export a function under `name`
    pub fn export_fn<F>(&mut self, name: &str, f: F) -> Result<(), InitError>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.insert(name, Export::Function(Arc::new(f)))
    }

    fn insert(&mut self, name: &str, export: Export) -> Result<(), InitError> {
        match self.exports.entry(name.to_string()) {
            Entry::Occupied(_) => Err(InitError::DuplicateExport(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(export);
                Ok(())
            }
        }
    }

    pub(crate) fn build(self) -> ModuleRecord {
        ModuleRecord::new(self.specifier, self.exports)
    }
}

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use super::{Binding, LiveCell, LoadError, Result};
use crate::value::Value;

/// Function exported by a module; it closes over the module's cells directly
pub type ExportedFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A single named export of a module record
#[derive(Clone)]
pub enum Export {
    Value(LiveCell),
    Function(ExportedFn),
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Export::Value(cell) => f.debug_tuple("Value").field(&cell.get()).finish(),
            Export::Function(_) => f.write_str("Function"),
        }
    }
}

/// The shared object produced by the first successful initialization of a module
#[derive(Debug)]
pub struct ModuleRecord {
    specifier: String,
    exports: IndexMap<String, Export>,
}

impl ModuleRecord {
    pub(crate) fn new(specifier: String, exports: IndexMap<String, Export>) -> Self {
        Self { specifier, exports }
    }

    /// Normalized specifier this record is cached under
    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    /// Export names in declaration order
    pub fn export_names(&self) -> Vec<&str> {
        self.exports.keys().map(String::as_str).collect()
    }

    pub fn has_export(&self, name: &str) -> bool {
        self.exports.contains_key(name)
    }

    /// Look up the raw export entry
    pub fn export(&self, name: &str) -> Result<&Export> {
        self.exports
            .get(name)
            .ok_or_else(|| LoadError::UndefinedExport {
                specifier: self.specifier.clone(),
                name: name.to_string(),
            })
    }

    /// Live reference to a value export
    pub fn get_export(&self, name: &str) -> Result<Binding> {
        match self.export(name)? {
            Export::Value(cell) => Ok(Binding::new(&self.specifier, name, cell.clone())),
            Export::Function(_) => Err(LoadError::NotAValue {
                specifier: self.specifier.clone(),
                name: name.to_string(),
            }),
        }
    }

    /// Snapshot of a value export's current contents
    ///
    /// The returned value is detached from the module: later mutations made by
    /// the module's functions are not reflected in it.
    pub fn copy_export(&self, name: &str) -> Result<Value> {
        self.get_export(name).map(|binding| binding.get())
    }

    /// Shared handle to a function export
    pub fn function(&self, name: &str) -> Result<ExportedFn> {
        match self.export(name)? {
            Export::Function(f) => Ok(Arc::clone(f)),
            Export::Value(_) => Err(LoadError::NotCallable {
                specifier: self.specifier.clone(),
                name: name.to_string(),
            }),
        }
    }

    /// Invoke a function export
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let f = self.function(name)?;
        Ok(f(args))
    }
}

impl fmt::Display for ModuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exports.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{ ")?;
        for (i, (name, export)) in self.exports.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match export {
                Export::Value(cell) => write!(f, "{}: {}", name, cell.get().inspect())?,
                Export::Function(_) => write!(f, "{}: [Function: {}]", name, name)?,
            }
        }
        write!(f, " }}")
    }
}

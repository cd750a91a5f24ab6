use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::{Binding, Export, ExportedFn, LoadError, ModuleRecord, Result};
use crate::value::Value;

/// How named exports are bound into the importing scope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStyle {
    /// `var counter = require("./index.js").counter`: value exports are copied
    #[default]
    Require,
    /// `import { counter } from "./index.js"`: value exports stay live
    Import,
}

impl FromStr for ImportStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "require" | "commonjs" | "cjs" => Ok(ImportStyle::Require),
            "import" | "esm" => Ok(ImportStyle::Import),
            other => Err(format!(
                "unknown import style '{}' (expected 'require' or 'import')",
                other
            )),
        }
    }
}

impl fmt::Display for ImportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStyle::Require => write!(f, "require"),
            ImportStyle::Import => write!(f, "import"),
        }
    }
}

/// How an imported name holds its export
#[derive(Clone)]
pub enum BindingKind {
    Copied(Value),
    Live(Binding),
    Function(ExportedFn),
}

/// A name bound in the importing scope
#[derive(Clone)]
pub struct ImportedBinding {
    specifier: String,
    name: String,
    kind: BindingKind,
}

impl ImportedBinding {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &BindingKind {
        &self.kind
    }

    /// Current value of a value binding
    pub fn value(&self) -> Result<Value> {
        match &self.kind {
            BindingKind::Copied(v) => Ok(v.clone()),
            BindingKind::Live(b) => Ok(b.get()),
            BindingKind::Function(_) => Err(LoadError::NotAValue {
                specifier: self.specifier.clone(),
                name: self.name.clone(),
            }),
        }
    }

    /// Call a function binding
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        match &self.kind {
            BindingKind::Function(f) => Ok(f(args)),
            _ => Err(LoadError::NotCallable {
                specifier: self.specifier.clone(),
                name: self.name.clone(),
            }),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.kind, BindingKind::Live(_))
    }
}

impl fmt::Debug for ImportedBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("ImportedBinding");
        out.field("name", &self.name);
        match &self.kind {
            BindingKind::Copied(v) => out.field("copied", v),
            BindingKind::Live(b) => out.field("live", &b.get()),
            BindingKind::Function(_) => out.field("function", &true),
        };
        out.finish()
    }
}

/// A module record seen through one import style
///
/// The record itself is always the registry's shared record; only the way
/// named bindings are extracted differs.
#[derive(Debug, Clone)]
pub struct ImportedModule {
    record: Arc<ModuleRecord>,
    style: ImportStyle,
}

impl ImportedModule {
    pub(crate) fn new(record: Arc<ModuleRecord>, style: ImportStyle) -> Self {
        Self { record, style }
    }

    /// The shared namespace object (`lib` in `var lib = require(..)`)
    pub fn record(&self) -> &Arc<ModuleRecord> {
        &self.record
    }

    pub fn style(&self) -> ImportStyle {
        self.style
    }

    /// Bind the export `name` according to the import style
    pub fn binding(&self, name: &str) -> Result<ImportedBinding> {
        let kind = match self.record.export(name)? {
            Export::Function(f) => BindingKind::Function(Arc::clone(f)),
            Export::Value(_) => match self.style {
                ImportStyle::Require => BindingKind::Copied(self.record.copy_export(name)?),
                ImportStyle::Import => BindingKind::Live(self.record.get_export(name)?),
            },
        };
        Ok(ImportedBinding {
            specifier: self.record.specifier().to_string(),
            name: name.to_string(),
            kind,
        })
    }
}

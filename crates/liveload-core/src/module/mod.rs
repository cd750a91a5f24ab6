//! Module cache with live export bindings
//!
//! A [`ModuleRegistry`] resolves specifiers to shared [`ModuleRecord`]s.
//! Each module body runs at most once per registry; exported values are
//! [`LiveCell`]s, so reading an export through any alias observes every
//! mutation the module's own functions perform.

mod builder;
mod cell;
mod error;
mod import;
mod record;
mod registry;
mod source;
mod specifier;

pub use builder::ModuleBuilder;
pub use cell::{Binding, LiveCell};
pub use error::{InitError, LoadError, Result};
pub use import::{BindingKind, ImportStyle, ImportedBinding, ImportedModule};
pub use record::{Export, ExportedFn, ModuleRecord};
pub use registry::ModuleRegistry;
pub use source::{ModuleSource, ModuleSources};
pub use specifier::{has_extension, normalize, SpecifierResolver, DEFAULT_EXTENSIONS};

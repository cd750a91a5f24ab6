pub mod config;
pub mod demo;
pub mod di;
pub mod diagnostics;
pub mod module;
pub mod property;
pub mod proxy;
pub mod value;

pub use config::{CliOverrides, ConfigError, LoaderConfig, LoaderOptions};
pub use demo::{Scenario, Transcript};
pub use di::Container;
pub use diagnostics::{
    CollectingDiagnosticHandler, ConsoleDiagnosticHandler, Diagnostic, DiagnosticHandler,
    DiagnosticLevel,
};
pub use module::{
    Binding, BindingKind, ImportStyle, ImportedBinding, ImportedModule, InitError, LiveCell,
    LoadError, ModuleBuilder, ModuleRecord, ModuleRegistry, ModuleSource, ModuleSources,
};
pub use property::{PlainObject, PropertyDescriptor, PropertyError};
pub use proxy::{ForwardingHandler, Proxy, ProxyHandler};
pub use value::Value;

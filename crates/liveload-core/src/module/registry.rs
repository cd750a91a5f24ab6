use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use super::{
    ImportStyle, ImportedModule, LoadError, ModuleBuilder, ModuleRecord, ModuleSources, Result,
    SpecifierResolver,
};
use crate::diagnostics::DiagnosticHandler;

/// Per-specifier cache slot. Its mutex serializes first-time initialization.
type Slot = Mutex<Option<Arc<ModuleRecord>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Module cache: one shared record per specifier
///
/// The first `resolve` of a specifier runs the module body and caches the
/// resulting record. Every later `resolve` of that specifier (or an alias
/// that normalizes to it) returns the same `Arc` without running the body
/// again. A failed initialization leaves nothing behind, so the next
/// `resolve` retries.
///
/// Concurrent first-time resolutions of one specifier run the body once;
/// different specifiers initialize independently.
pub struct ModuleRegistry {
    sources: ModuleSources,
    resolver: SpecifierResolver,
    slots: Mutex<FxHashMap<String, Arc<Slot>>>,
    diagnostics: Option<Arc<dyn DiagnosticHandler>>,
}

impl ModuleRegistry {
    pub fn new(sources: ModuleSources) -> Self {
        Self {
            sources,
            resolver: SpecifierResolver::default(),
            slots: Mutex::new(FxHashMap::default()),
            diagnostics: None,
        }
    }

    pub fn with_resolver(mut self, resolver: SpecifierResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_diagnostics(mut self, handler: Arc<dyn DiagnosticHandler>) -> Self {
        self.diagnostics = Some(handler);
        self
    }

    pub fn sources(&self) -> &ModuleSources {
        &self.sources
    }

    /// Map a raw specifier to the key its record is cached under
    pub fn resolve_key(&self, specifier: &str) -> Result<String> {
        self.resolver
            .resolve(specifier, |candidate| self.sources.contains(candidate))
    }

    /// Resolve a specifier to its shared module record
    pub fn resolve(&self, specifier: &str) -> Result<Arc<ModuleRecord>> {
        let mut shadowed = self
            .resolver
            .matches(specifier, |candidate| self.sources.contains(candidate))?;
        let key = shadowed.remove(0);
        let slot = self.slot(&key);
        let mut entry = lock(&slot);

        if let Some(record) = entry.as_ref() {
            debug!("Module cache hit for '{}'", key);
            return Ok(Arc::clone(record));
        }

        if !shadowed.is_empty() {
            let message = format!(
                "ambiguous specifier '{}' resolved to '{}', also matches {}",
                specifier.trim(),
                key,
                shadowed.join(", ")
            );
            warn!("{}", message);
            if let Some(handler) = &self.diagnostics {
                handler.warning(&key, &message);
            }
        }

        let source = self
            .sources
            .get(&key)
            .ok_or_else(|| LoadError::UnknownModule(key.clone()))?;

        info!("Initializing module '{}'", key);
        let mut builder = ModuleBuilder::new(&key);
        match source.initialize(&mut builder) {
            Ok(()) => {
                let record = Arc::new(builder.build());
                debug!(
                    "Module '{}' initialized with {} export(s)",
                    key,
                    record.export_names().len()
                );
                *entry = Some(Arc::clone(&record));
                Ok(record)
            }
            Err(e) => {
                warn!("Initialization of '{}' failed: {}", key, e);
                if let Some(handler) = &self.diagnostics {
                    handler.error(&key, &e.to_string());
                }
                Err(LoadError::Initialization {
                    specifier: key,
                    source: e,
                })
            }
        }
    }

    /// Resolve a specifier and view it through one of the two import styles
    pub fn import(&self, specifier: &str, style: ImportStyle) -> Result<ImportedModule> {
        let record = self.resolve(specifier)?;
        Ok(ImportedModule::new(record, style))
    }

    /// True once the specifier has a cached record
    pub fn is_loaded(&self, specifier: &str) -> bool {
        let Ok(key) = self.resolve_key(specifier) else {
            return false;
        };
        let Some(slot) = lock(&self.slots).get(&key).cloned() else {
            return false;
        };
        let loaded = lock(&slot).is_some();
        loaded
    }

    /// Keys of all cached records, sorted
    pub fn loaded_specifiers(&self) -> Vec<String> {
        let slots: Vec<(String, Arc<Slot>)> = lock(&self.slots)
            .iter()
            .map(|(k, v)| (k.clone(), Arc::clone(v)))
            .collect();
        let mut loaded: Vec<String> = slots
            .into_iter()
            .filter(|(_, slot)| lock(slot).is_some())
            .map(|(key, _)| key)
            .collect();
        loaded.sort();
        loaded
    }

    pub fn len(&self) -> usize {
        self.loaded_specifiers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &str) -> Arc<Slot> {
        let mut slots = lock(&self.slots);
        Arc::clone(
            slots
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(None))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnosticHandler;
    use crate::module::InitError;
    use crate::value::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_sources(runs: Arc<AtomicUsize>) -> ModuleSources {
        let mut sources = ModuleSources::new();
        sources
            .register(
                "./index.js",
                move |m: &mut ModuleBuilder| -> std::result::Result<(), InitError> {
                    runs.fetch_add(1, Ordering::SeqCst);
                    let counter = m.cell(3);
                    m.export_value("counter", &counter)
                },
            )
            .unwrap();
        sources
    }

    #[test]
    fn test_resolve_runs_body_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let registry = ModuleRegistry::new(counting_sources(runs.clone()));

        let first = registry.resolve("./index.js").unwrap();
        let second = registry.resolve("./index.js").unwrap();

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_aliases_share_record() {
        let runs = Arc::new(AtomicUsize::new(0));
        let registry = ModuleRegistry::new(counting_sources(runs.clone()));

        let a = registry.resolve("./index").unwrap();
        let b = registry.resolve("index.js").unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(registry.loaded_specifiers(), vec!["index.js".to_string()]);
    }

    #[test]
    fn test_unknown_module() {
        let registry = ModuleRegistry::new(ModuleSources::new());
        assert!(matches!(
            registry.resolve("./missing.js"),
            Err(LoadError::UnknownModule(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failed_init_is_reported_and_not_cached() {
        let mut sources = ModuleSources::new();
        sources
            .register(
                "broken.js",
                |_: &mut ModuleBuilder| -> std::result::Result<(), InitError> {
                    Err(InitError::failed("invalid internal state"))
                },
            )
            .unwrap();
        let handler = Arc::new(CollectingDiagnosticHandler::new());
        let registry = ModuleRegistry::new(sources).with_diagnostics(handler.clone());

        let err = registry.resolve("./broken.js").unwrap_err();

        assert!(matches!(err, LoadError::Initialization { ref specifier, .. } if specifier == "broken.js"));
        assert!(!registry.is_loaded("broken.js"));
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn test_ambiguous_specifier_warns_once() {
        let mut sources = ModuleSources::new();
        for key in ["1.js", "1.mjs"] {
            sources
                .register(
                    key,
                    |m: &mut ModuleBuilder| -> std::result::Result<(), InitError> {
                        let v = m.cell(m.specifier().to_string());
                        m.export_value("file", &v)
                    },
                )
                .unwrap();
        }
        let handler = Arc::new(CollectingDiagnosticHandler::new());
        let registry = ModuleRegistry::new(sources).with_diagnostics(handler.clone());

        let record = registry.resolve("./1").unwrap();
        registry.resolve("./1").unwrap();
        registry.resolve("./1.mjs").unwrap();

        assert_eq!(record.copy_export("file").unwrap(), Value::from("1.js"));
        assert_eq!(handler.warning_count(), 1);
        assert!(!handler.has_errors());
        let warning = &handler.get_diagnostics()[0];
        assert_eq!(warning.subject, "1.js");
        assert!(warning.message.contains("also matches 1.mjs"));
    }

    #[test]
    fn test_panicking_body_leaves_slot_empty() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let mut sources = ModuleSources::new();
        sources
            .register(
                "flaky.js",
                move |m: &mut ModuleBuilder| -> std::result::Result<(), InitError> {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        panic!("first run blows up");
                    }
                    let v = m.cell(1);
                    m.export_value("v", &v)
                },
            )
            .unwrap();
        let registry = ModuleRegistry::new(sources);

        let first = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.resolve("./flaky.js")
        }));
        assert!(first.is_err());
        assert!(!registry.is_loaded("flaky.js"));

        let record = registry.resolve("./flaky.js").unwrap();
        assert_eq!(record.copy_export("v").unwrap(), Value::from(1));
        assert!(registry.is_loaded("flaky.js"));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_custom_extensions() {
        let mut sources = ModuleSources::new();
        sources
            .register(
                "lib.cjs",
                |m: &mut ModuleBuilder| -> std::result::Result<(), InitError> {
                    let v = m.cell("cjs");
                    m.export_value("kind", &v)
                },
            )
            .unwrap();
        let registry = ModuleRegistry::new(sources)
            .with_resolver(SpecifierResolver::new(vec![".cjs".to_string()]));

        let record = registry.resolve("./lib").unwrap();
        assert_eq!(record.copy_export("kind").unwrap(), Value::from("cjs"));
    }
}

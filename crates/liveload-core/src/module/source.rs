use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::{normalize, InitError, LoadError, ModuleBuilder, Result};

/// The body of a module: runs once per registry to populate its exports
pub trait ModuleSource: Send + Sync {
    fn initialize(&self, module: &mut ModuleBuilder) -> std::result::Result<(), InitError>;
}

impl<F> ModuleSource for F
where
    F: Fn(&mut ModuleBuilder) -> std::result::Result<(), InitError> + Send + Sync,
{
    fn initialize(&self, module: &mut ModuleBuilder) -> std::result::Result<(), InitError> {
        self(module)
    }
}

/// Registered module bodies keyed by normalized specifier
#[derive(Default, Clone)]
pub struct ModuleSources {
    sources: FxHashMap<String, Arc<dyn ModuleSource>>,
}

impl ModuleSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module body; each key maps to exactly one source
    pub fn register<S>(&mut self, specifier: &str, source: S) -> Result<()>
    where
        S: ModuleSource + 'static,
    {
        let key = normalize(specifier)?;
        if self.sources.contains_key(&key) {
            return Err(LoadError::DuplicateSource(key));
        }
        self.sources.insert(key, Arc::new(source));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn ModuleSource>> {
        self.sources.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sources.contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sources.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_body(_: &mut ModuleBuilder) -> std::result::Result<(), InitError> {
        Ok(())
    }

    #[test]
    fn test_register_normalizes_key() {
        let mut sources = ModuleSources::new();
        sources.register("./index.js", empty_body).unwrap();

        assert!(sources.contains("index.js"));
        assert_eq!(sources.keys(), vec!["index.js".to_string()]);
    }

    #[test]
    fn test_duplicate_source_rejected() {
        let mut sources = ModuleSources::new();
        sources.register("./a.js", empty_body).unwrap();

        let err = sources.register("a.js", empty_body).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateSource(ref k) if k == "a.js"));
        assert_eq!(sources.len(), 1);
    }
}

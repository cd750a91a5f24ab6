use super::{LoadError, Result};

/// Default extensions tried, in order, for an extensionless specifier
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".mjs", ".cjs"];

/// Canonical form of a specifier: trimmed, with any leading `./` removed
pub fn normalize(raw: &str) -> Result<String> {
    let mut spec = raw.trim();
    while let Some(rest) = spec.strip_prefix("./") {
        spec = rest;
    }
    if spec.is_empty() || spec.ends_with('/') {
        return Err(LoadError::InvalidSpecifier(raw.to_string()));
    }
    Ok(spec.to_string())
}

/// True when the last path segment carries an extension
pub fn has_extension(spec: &str) -> bool {
    let file = spec.rsplit('/').next().unwrap_or(spec);
    matches!(file.rfind('.'), Some(idx) if idx > 0)
}

/// Maps raw specifiers onto registered source keys
#[derive(Debug, Clone)]
pub struct SpecifierResolver {
    extensions: Vec<String>,
}

impl Default for SpecifierResolver {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }
}

impl SpecifierResolver {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Candidate keys for a normalized specifier, most specific first
    pub fn candidates(&self, normalized: &str) -> Vec<String> {
        let mut out = vec![normalized.to_string()];
        if !has_extension(normalized) {
            out.extend(
                self.extensions
                    .iter()
                    .map(|ext| format!("{}{}", normalized, ext)),
            );
        }
        out
    }

    /// Resolve `raw` to the first candidate accepted by `exists`
    pub fn resolve<F>(&self, raw: &str, exists: F) -> Result<String>
    where
        F: Fn(&str) -> bool,
    {
        let normalized = normalize(raw)?;
        self.candidates(&normalized)
            .into_iter()
            .find(|candidate| exists(candidate))
            .ok_or(LoadError::UnknownModule(normalized))
    }

    /// Every candidate accepted by `exists`, in resolution order
    ///
    /// More than one match means an extensionless specifier is ambiguous;
    /// the first match is the one [`resolve`](Self::resolve) picks.
    pub fn matches<F>(&self, raw: &str, exists: F) -> Result<Vec<String>>
    where
        F: Fn(&str) -> bool,
    {
        let normalized = normalize(raw)?;
        let found: Vec<String> = self
            .candidates(&normalized)
            .into_iter()
            .filter(|candidate| exists(candidate))
            .collect();
        if found.is_empty() {
            return Err(LoadError::UnknownModule(normalized));
        }
        Ok(found)
    }
}

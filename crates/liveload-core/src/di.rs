use crate::config::LoaderConfig;
use crate::demo::{builtin_sources, scenario, Scenario, Transcript};
use crate::diagnostics::{ConsoleDiagnosticHandler, DiagnosticHandler};
use crate::module::{LoadError, ModuleRegistry, ModuleSources, SpecifierResolver};
use std::sync::Arc;
use tracing::info;

/// Dependency injection container
/// Owns the module registry and wires it to configuration and diagnostics
pub struct Container {
    config: Arc<LoaderConfig>,
    diagnostic_handler: Arc<dyn DiagnosticHandler>,
    registry: Arc<ModuleRegistry>,
    transcript: Transcript,
}

impl Container {
    /// Create a new container with production dependencies and the built-in modules
    pub fn new(config: LoaderConfig) -> Result<Self, LoadError> {
        let diagnostic_handler: Arc<dyn DiagnosticHandler> = Arc::new(
            ConsoleDiagnosticHandler::new(config.loader_options.pretty),
        );
        let transcript = Transcript::new();
        let sources = builtin_sources(&transcript)?;

        Ok(Self::with_dependencies(
            config,
            diagnostic_handler,
            sources,
            transcript,
        ))
    }

    /// Create a container with custom dependencies (for testing)
    pub fn with_dependencies(
        config: LoaderConfig,
        diagnostic_handler: Arc<dyn DiagnosticHandler>,
        sources: ModuleSources,
        transcript: Transcript,
    ) -> Self {
        let resolver = SpecifierResolver::new(config.loader_options.extensions.clone());
        let registry = ModuleRegistry::new(sources)
            .with_resolver(resolver)
            .with_diagnostics(Arc::clone(&diagnostic_handler));

        Container {
            config: Arc::new(config),
            diagnostic_handler,
            registry: Arc::new(registry),
            transcript,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Arc<LoaderConfig> {
        &self.config
    }

    /// Get the diagnostic handler
    pub fn diagnostic_handler(&self) -> &Arc<dyn DiagnosticHandler> {
        &self.diagnostic_handler
    }

    /// Get the module registry
    pub fn registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    /// Get the shared transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run one scenario and return the lines it printed
    ///
    /// Scenarios share this container's registry, so modules loaded by an
    /// earlier scenario stay loaded.
    pub fn run_scenario(&self, which: Scenario) -> Result<Vec<String>, LoadError> {
        info!("Running scenario '{}'", which);
        let options = &self.config.loader_options;
        self.transcript.take();

        let outcome = match which {
            Scenario::LiveBinding => {
                scenario::live_binding(&self.registry, options.import_style, &self.transcript)
            }
            Scenario::DefineProperty => {
                scenario::define_property(options.legacy_define, &self.transcript);
                Ok(())
            }
            Scenario::LoadOrder => scenario::load_order(&self.registry, &self.transcript),
            Scenario::ProxyGet => {
                scenario::proxy_get(&self.transcript);
                Ok(())
            }
        };

        let lines = self.transcript.take();
        outcome.map(|()| lines)
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.diagnostic_handler.has_errors()
    }

    /// Get the error count
    pub fn error_count(&self) -> usize {
        self.diagnostic_handler.error_count()
    }

    /// Get the warning count
    pub fn warning_count(&self) -> usize {
        self.diagnostic_handler.warning_count()
    }
}

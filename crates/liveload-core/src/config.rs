use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::module::{ImportStyle, DEFAULT_EXTENSIONS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Options that control module resolution and scenario output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderOptions {
    /// Extensions tried, in order, for extensionless specifiers
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// How named exports are bound by the live-binding scenario (default: require)
    #[serde(default)]
    pub import_style: ImportStyle,

    /// Also exercise the throwing property definition (default: false)
    #[serde(default)]
    pub legacy_define: bool,

    /// Pretty-print diagnostics (default: true)
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            import_style: ImportStyle::Require,
            legacy_define: false,
            pretty: true,
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderConfig {
    #[serde(default)]
    pub loader_options: LoaderOptions,

    /// Scenarios run when none are named on the command line
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<String>,
}

fn default_scenarios() -> Vec<String> {
    vec!["live-binding".to_string(), "define-property".to_string()]
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            loader_options: LoaderOptions::default(),
            scenarios: default_scenarios(),
        }
    }
}

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub import_style: Option<ImportStyle>,
    pub legacy_define: Option<bool>,
    pub pretty: Option<bool>,
}

impl LoaderConfig {
    /// Load configuration from a JSON or YAML file (chosen by extension)
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(config)
    }

    /// Create a default configuration and write it to a file
    pub fn init_file(path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(&LoaderConfig::default())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(style) = overrides.import_style {
            self.loader_options.import_style = style;
        }
        if let Some(legacy) = overrides.legacy_define {
            self.loader_options.legacy_define = legacy;
        }
        if let Some(pretty) = overrides.pretty {
            self.loader_options.pretty = pretty;
        }
    }
}

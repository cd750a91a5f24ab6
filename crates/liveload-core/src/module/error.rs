use thiserror::Error;

/// Failure raised by a module body while it is being initialized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("duplicate export '{0}'")]
    DuplicateExport(String),

    #[error("{0}")]
    Failed(String),
}

impl InitError {
    pub fn failed(message: impl Into<String>) -> Self {
        InitError::Failed(message.into())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid module specifier: {0:?}")]
    InvalidSpecifier(String),

    #[error("Cannot find module '{0}'")]
    UnknownModule(String),

    #[error("Module source already registered for '{0}'")]
    DuplicateSource(String),

    #[error("Failed to initialize module '{specifier}': {source}")]
    Initialization {
        specifier: String,
        #[source]
        source: InitError,
    },

    #[error("Module '{specifier}' has no export named '{name}'")]
    UndefinedExport { specifier: String, name: String },

    #[error("Export '{name}' of module '{specifier}' is not a function")]
    NotCallable { specifier: String, name: String },

    #[error("Export '{name}' of module '{specifier}' is a function, not a value")]
    NotAValue { specifier: String, name: String },
}

pub type Result<T> = std::result::Result<T, LoadError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilaError {
    #[error("File not found: {path}")]
    NotFound { path: String },
    #[error("Not implemented: {operation}")]
    NotImplemented { operation: &'static str },
    #[error("Host plugin not installed: {name}")]
    PluginUnavailable { name: String },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid binary payload: {0}")]
    InvalidPayload(String),
    #[error("Default roots have already been set")]
    DefaultsAlreadySet,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FilaError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }

    /// Whether this error reports a permanent capability gap.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}

pub type Result<T> = std::result::Result<T, FilaError>;

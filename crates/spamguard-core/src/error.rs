//! Error types for SpamGuard

/// Result type alias using SpamGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for SpamGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad or empty input, correctable by the caller
    #[error("invalid data: {0}")]
    Validation(String),

    /// Classification attempted before the model artifacts were loaded
    #[error("model not loaded")]
    NotLoaded,

    /// Scorer exposes neither probability estimates nor a decision margin
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    /// A model artifact is missing or corrupt
    #[error("failed to load model: {0}")]
    Load(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new unsupported model error
    pub fn unsupported_model(msg: impl Into<String>) -> Self {
        Self::UnsupportedModel(msg.into())
    }

    /// Create a new load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable name, used in error bodies and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotLoaded => "model_not_loaded",
            Self::UnsupportedModel(_) => "unsupported_model",
            Self::Load(_) => "load_error",
            Self::Config(_) => "config_error",
            Self::Io(_) => "io_error",
            Self::Serialization(_) => "serialization_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

use thiserror::Error;

/// Unified error type for semvertag operations
#[derive(Error, Debug)]
pub enum SemvertagError {
    #[error("'{0}' is not a valid version string")]
    InvalidVersionString(String),

    #[error("tag '{tag}' does not start with prefix '{prefix}'")]
    PrefixMismatch { tag: String, prefix: String },

    #[error("unsupported bump field '{0}', expected one of: major, minor, patch, build")]
    UnsupportedField(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semvertag
pub type Result<T> = std::result::Result<T, SemvertagError>;

impl SemvertagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemvertagError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        SemvertagError::Remote(msg.into())
    }
}

use crate::domain::values::domain_key::DomainKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Domain '{0}' has no documents; ingest documents before searching")]
    UntrainedDomain(DomainKey),

    #[error("Corrupt store at {path}: {message}")]
    CorruptStore { path: String, message: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl DomainError {
    /// Prefixes embedding failures with where they happened. Other variants pass through.
    pub fn context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            DomainError::Embedding(msg) => DomainError::Embedding(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Io(e.to_string())
    }
}

use crate::domain::error::DomainError;

/// Text to vector boundary. Implementations return mean-pooled, unit-normalized
/// vectors of a fixed length for the lifetime of the process.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    fn dimension(&self) -> usize;

    /// Loads whatever the provider needs (model weights, clients) ahead of the
    /// first `embed` call. Must be idempotent.
    async fn initialize(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::values::embedding::Embedding;
use std::sync::Arc;
use std::time::Duration;

/// Calls the provider with an optional deadline and checks the result
/// against the provider's declared dimension.
pub struct Embedder {
    provider: Arc<dyn EmbeddingProvider>,
    timeout: Option<Duration>,
}

impl Embedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, timeout: Option<Duration>) -> Self {
        Self { provider, timeout }
    }

    pub async fn initialize(&self) -> Result<(), DomainError> {
        self.provider.initialize().await
    }

    pub async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let values = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.provider.embed(text))
                .await
                .map_err(|_| DomainError::Embedding(format!("embedding timed out after {limit:?}")))??,
            None => self.provider.embed(text).await?,
        };
        Embedding::with_dimension(values, self.provider.dimension())
    }
}

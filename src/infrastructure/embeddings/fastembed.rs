use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::{Arc, Mutex};

/// all-MiniLM-L6-v2 output size.
pub const DIMENSION: usize = 384;

/// Local sentence-transformer (all-MiniLM-L6-v2, mean-pooled and normalized)
/// run through ONNX. Loading downloads weights on first use, so construct it
/// behind a `LazyProvider`.
pub struct FastEmbedProvider {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedProvider {
    pub async fn load() -> Result<Self, DomainError> {
        let model = tokio::task::spawn_blocking(|| {
            TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
                .map_err(|e| DomainError::Embedding(format!("failed to load all-MiniLM-L6-v2: {e}")))
        })
        .await
        .map_err(|e| DomainError::Embedding(format!("model loader panicked: {e}")))??;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let model = self.model.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().map_err(|e| DomainError::Embedding(e.to_string()))?;
            model
                .embed(vec![text], None)
                .map_err(|e| DomainError::Embedding(format!("fastembed: {e}")))?
                .pop()
                .ok_or_else(|| DomainError::Embedding("fastembed returned no embeddings".into()))
        })
        .await
        .map_err(|e| DomainError::Embedding(format!("embedding task panicked: {e}")))?
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }
}

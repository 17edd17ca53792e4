use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

type ProviderFuture = Pin<Box<dyn Future<Output = Result<Arc<dyn EmbeddingProvider>, DomainError>> + Send>>;
type ProviderFactory = Box<dyn Fn() -> ProviderFuture + Send + Sync>;

/// Defers building the inner provider until first use, and builds it at most
/// once. Concurrent first callers all await the same attempt and observe the
/// same outcome; a failed attempt is not retried.
pub struct LazyProvider {
    name: &'static str,
    dimension: usize,
    factory: ProviderFactory,
    cell: OnceCell<Result<Arc<dyn EmbeddingProvider>, String>>,
}

impl LazyProvider {
    pub fn new<F, Fut>(name: &'static str, dimension: usize, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn EmbeddingProvider>, DomainError>> + Send + 'static,
    {
        Self {
            name,
            dimension,
            factory: Box::new(move || Box::pin(factory())),
            cell: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    async fn inner(&self) -> Result<&Arc<dyn EmbeddingProvider>, DomainError> {
        let outcome = self
            .cell
            .get_or_init(|| async {
                match (self.factory)().await {
                    Ok(provider) => {
                        if let Err(e) = provider.initialize().await {
                            warn!(provider = self.name, error = %e, "embedding provider failed to initialize");
                            return Err(e.to_string());
                        }
                        info!(provider = self.name, dimension = provider.dimension(), "embedding provider ready");
                        Ok(provider)
                    }
                    Err(e) => {
                        warn!(provider = self.name, error = %e, "embedding provider failed to initialize");
                        Err(e.to_string())
                    }
                }
            })
            .await;

        outcome
            .as_ref()
            .map_err(|msg| DomainError::Embedding(format!("{} initialization failed: {msg}", self.name)))
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for LazyProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        self.inner().await?.embed(text).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn initialize(&self) -> Result<(), DomainError> {
        self.inner().await.map(|_| ())
    }
}

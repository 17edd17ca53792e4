pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::embedder::Embedder;
use crate::application::ingest::IngestUseCase;
use crate::application::registry::StoreRegistry;
use crate::application::search::{ScoredText, SearchUseCase};
use crate::application::status::{DomainStatus, StatusUseCase};
use crate::config::{ProviderKind, StoreConfig};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::record_store::RecordStore;
use crate::domain::values::domain_key::DomainKey;
use crate::infrastructure::embeddings::hashing::{self, HashingProvider};
use crate::infrastructure::embeddings::lazy::LazyProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::json::record_store::JsonRecordStore;
use std::sync::Arc;
use std::time::Duration;

/// Semantic retrieval over the statically registered document domains.
///
/// Construct one per process and share it by reference.
pub struct RagStore {
    embedder: Arc<Embedder>,
    registry: Arc<StoreRegistry>,
    ingest_uc: IngestUseCase,
    search_uc: SearchUseCase,
    status_uc: StatusUseCase,
}

impl RagStore {
    pub fn new(config: &StoreConfig) -> Result<Self, DomainError> {
        let record_store: Arc<dyn RecordStore> = Arc::new(JsonRecordStore::new(config.data_dir.clone()));
        let embedder = build_provider(config)?;
        Ok(Self::with_options(record_store, embedder, &DomainKey::ALL, config.embed_timeout))
    }

    pub fn with_providers(record_store: Arc<dyn RecordStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_options(record_store, embedder, &DomainKey::ALL, None)
    }

    pub fn with_options(
        record_store: Arc<dyn RecordStore>,
        provider: Arc<dyn EmbeddingProvider>,
        domains: &[DomainKey],
        embed_timeout: Option<Duration>,
    ) -> Self {
        let registry = Arc::new(StoreRegistry::new(domains, record_store.as_ref()));
        let embedder = Arc::new(Embedder::new(provider, embed_timeout));

        Self {
            ingest_uc: IngestUseCase::new(registry.clone(), embedder.clone(), record_store.clone()),
            search_uc: SearchUseCase::new(registry.clone(), embedder.clone(), record_store.clone()),
            status_uc: StatusUseCase::new(registry.clone(), record_store),
            embedder,
            registry,
        }
    }

    /// Preloads the embedding provider. Safe to call any number of times.
    pub async fn initialize(&self) -> Result<(), DomainError> {
        self.embedder.initialize().await
    }

    /// Replaces `domain`'s collection with `chunks`. Returns the record count.
    pub async fn add_documents<S: AsRef<str>>(&self, chunks: &[S], domain: &str) -> Result<usize, DomainError> {
        let key = self.registry.resolve(domain)?.key();
        let chunks: Vec<&str> = chunks.iter().map(|c| c.as_ref()).collect();
        self.ingest_uc.execute(key, &chunks).await
    }

    /// Texts of the `top_n` stored chunks most similar to `query`, best first.
    pub async fn search(&self, query: &str, domain: &str, top_n: usize) -> Result<Vec<String>, DomainError> {
        Ok(self
            .search_scored(query, domain, top_n)
            .await?
            .into_iter()
            .map(|r| r.text)
            .collect())
    }

    pub async fn search_scored(&self, query: &str, domain: &str, top_n: usize) -> Result<Vec<ScoredText>, DomainError> {
        let key = self.registry.resolve(domain)?.key();
        self.search_uc.execute(key, query, top_n).await
    }

    pub async fn is_trained(&self, domain: &str) -> Result<bool, DomainError> {
        let key = self.registry.resolve(domain)?.key();
        self.status_uc.is_trained(key).await
    }

    pub async fn available_documents(&self) -> Result<Vec<DomainKey>, DomainError> {
        self.status_uc.available().await
    }

    pub async fn status(&self) -> Result<Vec<DomainStatus>, DomainError> {
        self.status_uc.status().await
    }
}

fn build_provider(config: &StoreConfig) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    match config.provider {
        ProviderKind::Hashing => Ok(Arc::new(HashingProvider::new(hashing::DEFAULT_DIMENSION))),
        ProviderKind::OpenAi => {
            let api_key = config.api_key.clone().filter(|k| !k.is_empty()).ok_or_else(|| {
                DomainError::Config("openai provider requires RAGSTORE_EMBEDDING_API_KEY".into())
            })?;
            let model = config.model.clone();
            let base_url = config.base_url.clone();
            let configured = config.dimension;
            let dimension = OpenAiProvider::resolve_dimension(
                model.as_deref().unwrap_or(OpenAiProvider::DEFAULT_MODEL),
                configured,
            )?;
            Ok(Arc::new(LazyProvider::new("openai", dimension, move || {
                let provider = OpenAiProvider::new(api_key.clone(), model.clone(), base_url.clone(), configured);
                async move { provider.map(|p| Arc::new(p) as Arc<dyn EmbeddingProvider>) }
            })))
        }
        #[cfg(feature = "fastembed")]
        ProviderKind::FastEmbed => {
            use crate::infrastructure::embeddings::fastembed::{self, FastEmbedProvider};
            Ok(Arc::new(LazyProvider::new("fastembed", fastembed::DIMENSION, || async {
                FastEmbedProvider::load()
                    .await
                    .map(|p| Arc::new(p) as Arc<dyn EmbeddingProvider>)
            })))
        }
        #[cfg(not(feature = "fastembed"))]
        ProviderKind::FastEmbed => Err(DomainError::Config(
            "fastembed provider requires building with the `fastembed` feature".into(),
        )),
    }
}

//! Shared test helpers.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use ragstore::domain::entities::document_record::DocumentRecord;
use ragstore::domain::error::DomainError;
use ragstore::domain::ports::embedding_port::EmbeddingProvider;
use ragstore::domain::ports::record_store::RecordStore;
use ragstore::domain::values::domain_key::DomainKey;
use ragstore::infrastructure::embeddings::hashing::HashingProvider;
use ragstore::infrastructure::json::record_store::JsonRecordStore;
use ragstore::RagStore;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn setup(dir: &Path) -> RagStore {
    RagStore::with_providers(
        Arc::new(JsonRecordStore::new(dir)),
        Arc::new(HashingProvider::default()),
    )
}

pub fn setup_with(dir: &Path, provider: Arc<dyn EmbeddingProvider>) -> RagStore {
    RagStore::with_providers(Arc::new(JsonRecordStore::new(dir)), provider)
}

pub fn store_file(dir: &Path, domain: &str) -> std::path::PathBuf {
    dir.join(format!("vector_store_{domain}.json"))
}

/// Fails on any text containing `POISON`, otherwise behaves like the hashing provider.
pub struct PoisonProvider {
    inner: HashingProvider,
}

impl PoisonProvider {
    pub fn new() -> Self {
        Self {
            inner: HashingProvider::default(),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for PoisonProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        if text.contains("POISON") {
            return Err(DomainError::Embedding("model rejected input".into()));
        }
        self.inner.embed(text).await
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}

/// Hashing provider that sleeps before every call.
pub struct SlowProvider {
    inner: HashingProvider,
    delay: Duration,
}

impl SlowProvider {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: HashingProvider::default(),
            delay,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for SlowProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        tokio::time::sleep(self.delay).await;
        self.inner.embed(text).await
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}

/// JSON store that counts loads and holds each one open briefly,
/// widening the window in which concurrent first readers overlap.
pub struct CountingRecordStore {
    inner: JsonRecordStore,
    loads: AtomicUsize,
    load_delay: Duration,
}

impl CountingRecordStore {
    pub fn new(dir: &Path, load_delay: Duration) -> Self {
        Self {
            inner: JsonRecordStore::new(dir),
            loads: AtomicUsize::new(0),
            load_delay,
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RecordStore for CountingRecordStore {
    async fn load(&self, domain: DomainKey) -> Result<Option<Vec<DocumentRecord>>, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.load_delay).await;
        self.inner.load(domain).await
    }

    async fn save(&self, domain: DomainKey, records: &[DocumentRecord]) -> Result<(), DomainError> {
        self.inner.save(domain, records).await
    }

    async fn exists(&self, domain: DomainKey) -> Result<bool, DomainError> {
        self.inner.exists(domain).await
    }

    async fn modified_at(&self, domain: DomainKey) -> Result<Option<DateTime<Utc>>, DomainError> {
        self.inner.modified_at(domain).await
    }

    fn location(&self, domain: DomainKey) -> PathBuf {
        self.inner.location(domain)
    }
}

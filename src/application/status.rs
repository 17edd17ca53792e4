use crate::application::registry::StoreRegistry;
use crate::domain::error::DomainError;
use crate::domain::ports::record_store::RecordStore;
use crate::domain::values::domain_key::DomainKey;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct DomainStatus {
    pub domain: DomainKey,
    /// Persisted file exists.
    pub trained: bool,
    /// Records currently in memory. Zero until the first search or ingestion.
    pub resident_documents: usize,
    pub path: String,
    pub trained_at: Option<DateTime<Utc>>,
}

pub struct StatusUseCase {
    registry: Arc<StoreRegistry>,
    record_store: Arc<dyn RecordStore>,
}

impl StatusUseCase {
    pub fn new(registry: Arc<StoreRegistry>, record_store: Arc<dyn RecordStore>) -> Self {
        Self {
            registry,
            record_store,
        }
    }

    /// Defined by file existence alone, regardless of what is resident.
    pub async fn is_trained(&self, domain: DomainKey) -> Result<bool, DomainError> {
        self.registry.get(domain)?;
        self.record_store.exists(domain).await
    }

    pub async fn available(&self) -> Result<Vec<DomainKey>, DomainError> {
        let mut trained = Vec::new();
        for key in self.registry.keys() {
            if self.record_store.exists(key).await? {
                trained.push(key);
            }
        }
        Ok(trained)
    }

    pub async fn status(&self) -> Result<Vec<DomainStatus>, DomainError> {
        let mut out = Vec::new();
        for store in self.registry.stores() {
            let key = store.key();
            out.push(DomainStatus {
                domain: key,
                trained: self.record_store.exists(key).await?,
                resident_documents: store.snapshot().await.len(),
                path: store.path().display().to_string(),
                trained_at: self.record_store.modified_at(key).await?,
            });
        }
        Ok(out)
    }
}

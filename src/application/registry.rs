use crate::domain::entities::document_record::DocumentRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::record_store::RecordStore;
use crate::domain::values::domain_key::DomainKey;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::info;

/// The resident collection for one domain.
///
/// Readers take an `Arc` snapshot under a short read lock, so a search sees
/// either the whole collection before an ingestion or the whole collection
/// after it. Writers for the same domain are serialized by `ingest_lock`.
pub struct DomainStore {
    key: DomainKey,
    path: PathBuf,
    documents: RwLock<Arc<Vec<DocumentRecord>>>,
    ingest_lock: Mutex<()>,
}

impl DomainStore {
    pub fn new(key: DomainKey, path: PathBuf) -> Self {
        Self {
            key,
            path,
            documents: RwLock::new(Arc::new(Vec::new())),
            ingest_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> DomainKey {
        self.key
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> Arc<Vec<DocumentRecord>> {
        self.documents.read().await.clone()
    }

    /// Held for the whole of an ingestion.
    pub async fn lock_for_ingest(&self) -> MutexGuard<'_, ()> {
        self.ingest_lock.lock().await
    }

    /// Swaps in a new collection, dropping the old one wholesale.
    pub async fn replace(&self, records: Vec<DocumentRecord>) {
        *self.documents.write().await = Arc::new(records);
    }

    /// Returns the resident collection, reading it from `store` first if
    /// nothing is resident. Only one concurrent caller performs the read.
    pub async fn load_if_empty(&self, store: &dyn RecordStore) -> Result<Arc<Vec<DocumentRecord>>, DomainError> {
        {
            let docs = self.documents.read().await;
            if !docs.is_empty() {
                return Ok(docs.clone());
            }
        }

        let mut docs = self.documents.write().await;
        if docs.is_empty() {
            if let Some(records) = store.load(self.key).await? {
                info!(domain = %self.key, count = records.len(), "loaded persisted collection");
                *docs = Arc::new(records);
            }
        }
        Ok(docs.clone())
    }
}

/// Fixed mapping from domain key to its store, decided at construction.
pub struct StoreRegistry {
    stores: Vec<DomainStore>,
}

impl StoreRegistry {
    pub fn new(domains: &[DomainKey], record_store: &dyn RecordStore) -> Self {
        let mut keys = domains.to_vec();
        keys.sort();
        keys.dedup();
        Self {
            stores: keys
                .into_iter()
                .map(|key| DomainStore::new(key, record_store.location(key)))
                .collect(),
        }
    }

    pub fn get(&self, key: DomainKey) -> Result<&DomainStore, DomainError> {
        self.stores
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| DomainError::InvalidDomain(key.to_string()))
    }

    /// Parses a raw key and looks it up. Unknown and unregistered keys both
    /// fail with `InvalidDomain`.
    pub fn resolve(&self, raw: &str) -> Result<&DomainStore, DomainError> {
        self.get(raw.parse()?)
    }

    pub fn keys(&self) -> impl Iterator<Item = DomainKey> + '_ {
        self.stores.iter().map(|s| s.key)
    }

    pub fn stores(&self) -> &[DomainStore] {
        &self.stores
    }
}

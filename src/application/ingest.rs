use crate::application::embedder::Embedder;
use crate::application::registry::StoreRegistry;
use crate::domain::entities::document_record::DocumentRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::record_store::RecordStore;
use crate::domain::values::domain_key::DomainKey;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct IngestUseCase {
    registry: Arc<StoreRegistry>,
    embedder: Arc<Embedder>,
    record_store: Arc<dyn RecordStore>,
}

impl IngestUseCase {
    pub fn new(
        registry: Arc<StoreRegistry>,
        embedder: Arc<Embedder>,
        record_store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            registry,
            embedder,
            record_store,
        }
    }

    /// Replaces the domain's collection with `chunks`, in order.
    ///
    /// The new collection is built aside and only becomes visible, on disk and
    /// in memory, once every chunk has embedded and the file is written. Any
    /// failure leaves both untouched.
    pub async fn execute(&self, domain: DomainKey, chunks: &[&str]) -> Result<usize, DomainError> {
        let store = self.registry.get(domain)?;
        let _guard = store.lock_for_ingest().await;

        let mut records = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            let embedding = self.embedder.embed(chunk).await.map_err(|e| {
                warn!(%domain, chunk_index = i, error = %e, "ingestion aborted");
                e.context(format!("ingest {domain} chunk {i}"))
            })?;
            records.push(DocumentRecord::new(domain, i, chunk.to_string(), embedding));
        }
        debug!(%domain, count = records.len(), "embedded chunks");

        self.record_store.save(domain, &records).await?;
        let count = records.len();
        store.replace(records).await;

        info!(%domain, count, path = %store.path().display(), "ingested collection");
        Ok(count)
    }
}

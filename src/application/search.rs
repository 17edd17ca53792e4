use crate::application::embedder::Embedder;
use crate::application::registry::StoreRegistry;
use crate::domain::error::DomainError;
use crate::domain::ports::record_store::RecordStore;
use crate::domain::values::domain_key::DomainKey;
use crate::domain::values::similarity;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredText {
    pub id: String,
    pub text: String,
    pub score: f64,
}

pub struct SearchUseCase {
    registry: Arc<StoreRegistry>,
    embedder: Arc<Embedder>,
    record_store: Arc<dyn RecordStore>,
}

impl SearchUseCase {
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

    /// Exhaustive cosine ranking of the domain's collection against `query`.
    pub async fn execute(&self, domain: DomainKey, query: &str, top_n: usize) -> Result<Vec<ScoredText>, DomainError> {
        let store = self.registry.get(domain)?;
        let documents = store.load_if_empty(self.record_store.as_ref()).await?;
        if documents.is_empty() {
            return Err(DomainError::UntrainedDomain(domain));
        }

        let query_vec = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| e.context(format!("search {domain}")))?;
        let stored_dim = documents[0].embedding.dimension();
        if query_vec.dimension() != stored_dim {
            return Err(DomainError::DimensionMismatch {
                expected: stored_dim,
                actual: query_vec.dimension(),
            });
        }

        let ranked = similarity::rank(
            query_vec.as_slice(),
            documents.iter().map(|d| d.embedding.as_slice()),
            top_n,
        );
        debug!(%domain, top_n, candidates = documents.len(), returned = ranked.len(), "search completed");

        Ok(ranked
            .into_iter()
            .map(|(i, score)| ScoredText {
                id: documents[i].id.clone(),
                text: documents[i].text.clone(),
                score,
            })
            .collect())
    }
}

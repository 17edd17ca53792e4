use crate::domain::entities::document_record::DocumentRecord;
use crate::domain::error::DomainError;
use crate::domain::values::domain_key::DomainKey;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Durable storage for whole domain collections. Writes replace the previous
/// collection in full.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns `None` when nothing has ever been saved for the domain.
    async fn load(&self, domain: DomainKey) -> Result<Option<Vec<DocumentRecord>>, DomainError>;

    async fn save(&self, domain: DomainKey, records: &[DocumentRecord]) -> Result<(), DomainError>;

    async fn exists(&self, domain: DomainKey) -> Result<bool, DomainError>;

    /// Last write time, if the domain has been saved.
    async fn modified_at(&self, domain: DomainKey) -> Result<Option<DateTime<Utc>>, DomainError>;

    fn location(&self, domain: DomainKey) -> PathBuf;
}

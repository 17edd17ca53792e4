use crate::domain::entities::document_record::DocumentRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::record_store::RecordStore;
use crate::domain::values::domain_key::DomainKey;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Stores each domain as a pretty-printed JSON array in
/// `<data_dir>/vector_store_<domain>.json`.
pub struct JsonRecordStore {
    data_dir: PathBuf,
}

impl JsonRecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn corrupt(path: &Path, message: impl Into<String>) -> DomainError {
        DomainError::CorruptStore {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    fn validate(path: &Path, domain: DomainKey, records: &[DocumentRecord]) -> Result<(), DomainError> {
        let Some(first) = records.first() else {
            return Ok(());
        };
        let dim = first.embedding.dimension();
        for record in records {
            if record.embedding.dimension() != dim {
                return Err(Self::corrupt(
                    path,
                    format!(
                        "record {} has dimension {}, expected {dim}",
                        record.id,
                        record.embedding.dimension()
                    ),
                ));
            }
            if record.metadata.domain != domain {
                return Err(Self::corrupt(
                    path,
                    format!("record {} belongs to domain {}", record.id, record.metadata.domain),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordStore for JsonRecordStore {
    async fn load(&self, domain: DomainKey) -> Result<Option<Vec<DocumentRecord>>, DomainError> {
        let path = self.location(domain);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::Io(format!("{}: {e}", path.display()))),
        };

        let records: Vec<DocumentRecord> = serde_json::from_str(&raw).map_err(|e| {
            warn!(%domain, path = %path.display(), error = %e, "persisted store failed to parse");
            Self::corrupt(&path, e.to_string())
        })?;
        Self::validate(&path, domain, &records)?;

        debug!(%domain, count = records.len(), path = %path.display(), "loaded records");
        Ok(Some(records))
    }

    async fn save(&self, domain: DomainKey, records: &[DocumentRecord]) -> Result<(), DomainError> {
        let path = self.location(domain);
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| DomainError::Io(format!("{}: {e}", self.data_dir.display())))?;

        let body = serde_json::to_string_pretty(records)
            .map_err(|e| DomainError::Io(format!("serialize {domain}: {e}")))?;

        // Write beside the target, flush to disk, then rename over it
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = write_synced(&tmp, body.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(DomainError::Io(format!("{}: {e}", tmp.display())));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(DomainError::Io(format!("{}: {e}", path.display())));
        }

        debug!(%domain, count = records.len(), path = %path.display(), "saved records");
        Ok(())
    }

    async fn exists(&self, domain: DomainKey) -> Result<bool, DomainError> {
        let path = self.location(domain);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DomainError::Io(format!("{}: {e}", path.display())))
    }

    async fn modified_at(&self, domain: DomainKey) -> Result<Option<DateTime<Utc>>, DomainError> {
        let path = self.location(domain);
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(Some(meta.modified()?.into())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::Io(format!("{}: {e}", path.display()))),
        }
    }

    fn location(&self, domain: DomainKey) -> PathBuf {
        self.data_dir.join(domain.file_name())
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

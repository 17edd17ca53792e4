use crate::domain::values::domain_key::DomainKey;
use crate::domain::values::embedding::Embedding;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(rename = "chunk_id")]
    pub chunk_index: usize,
    #[serde(rename = "source")]
    pub source_name: String,
    #[serde(rename = "documentType")]
    pub domain: DomainKey,
}

/// One embedded chunk of a domain's document, as stored and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub text: String,
    pub embedding: Embedding,
    pub metadata: RecordMetadata,
}

impl DocumentRecord {
    /// Builds the record for the `chunk_index`-th chunk ingested into `domain`.
    /// Id and metadata are derived, never supplied.
    pub fn new(domain: DomainKey, chunk_index: usize, text: String, embedding: Embedding) -> Self {
        Self {
            id: domain.record_id(chunk_index),
            text,
            embedding,
            metadata: RecordMetadata {
                chunk_index,
                source_name: domain.source_name(),
                domain,
            },
        }
    }
}

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A statically registered document domain. Each has its own collection and file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKey {
    Erp,
    Hrms,
}

impl DomainKey {
    pub const ALL: [DomainKey; 2] = [DomainKey::Erp, DomainKey::Hrms];

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainKey::Erp => "erp",
            DomainKey::Hrms => "hrms",
        }
    }

    /// Source document name recorded in each record's metadata.
    pub fn source_name(&self) -> String {
        format!("{}_guide.pdf", self.as_str())
    }

    pub fn file_name(&self) -> String {
        format!("vector_store_{}.json", self.as_str())
    }

    pub fn record_id(&self, chunk_index: usize) -> String {
        format!("{}_doc_{}", self.as_str(), chunk_index)
    }
}

impl fmt::Display for DomainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DomainKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "erp" => Ok(DomainKey::Erp),
            "hrms" => Ok(DomainKey::Hrms),
            _ => Err(DomainError::InvalidDomain(s.to_string())),
        }
    }
}

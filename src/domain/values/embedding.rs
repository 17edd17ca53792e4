use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// A non-empty, finite embedding vector. Its length is the dimension D.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Result<Self, DomainError> {
        if values.is_empty() {
            return Err(DomainError::Embedding("embedding vector is empty".into()));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(DomainError::Embedding(format!(
                "embedding has a non-finite value at position {pos}"
            )));
        }
        Ok(Embedding(values))
    }

    /// Checks the vector length against an expected dimension.
    pub fn with_dimension(values: Vec<f32>, expected: usize) -> Result<Self, DomainError> {
        if values.len() != expected {
            return Err(DomainError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        Self::new(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl TryFrom<Vec<f32>> for Embedding {
    type Error = DomainError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Embedding::new(values)
    }
}

impl From<Embedding> for Vec<f32> {
    fn from(e: Embedding) -> Self {
        e.0
    }
}

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Embeddings from an OpenAI-compatible `/v1/embeddings` endpoint.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    dimension: usize,
    /// Sent as `dimensions` so text-embedding-3 models truncate server side.
    request_dimensions: Option<usize>,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    input: Vec<&'a str>,
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    embedding: Vec<f32>,
}

impl OpenAiProvider {
    pub const DEFAULT_MODEL: &'static str = "text-embedding-3-small";

    /// `dimension` is required for models outside OpenAI's own table.
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        dimension: Option<usize>,
    ) -> Result<Self, DomainError> {
        if api_key.is_empty() {
            return Err(DomainError::Config("OpenAI API key must not be empty".into()));
        }
        let model = model.unwrap_or_else(|| Self::DEFAULT_MODEL.to_string());
        let resolved = Self::resolve_dimension(&model, dimension)?;
        let request_dimensions = dimension.filter(|_| model.starts_with("text-embedding-3"));

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            dimension: resolved,
            request_dimensions,
        })
    }

    /// Known output sizes of OpenAI's hosted models.
    pub fn model_dimension(model: &str) -> Option<usize> {
        match model {
            "text-embedding-3-large" => Some(3072),
            "text-embedding-3-small" | "text-embedding-ada-002" => Some(1536),
            _ => None,
        }
    }

    /// A configured dimension wins; otherwise the model must be a known one.
    pub fn resolve_dimension(model: &str, configured: Option<usize>) -> Result<usize, DomainError> {
        match configured {
            Some(0) => Err(DomainError::Config("embedding dimension must be greater than zero".into())),
            Some(dim) => Ok(dim),
            None => Self::model_dimension(model).ok_or_else(|| {
                DomainError::Config(format!(
                    "unknown dimension for embedding model {model}; set RAGSTORE_EMBEDDING_DIMENSION"
                ))
            }),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        debug!(provider = "openai", model = %self.model, text_len = text.len(), "embedding text");
        let url = format!("{}/v1/embeddings", self.base_url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&OpenAiRequest {
                input: vec![text],
                model: &self.model,
                dimensions: self.request_dimensions,
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("OpenAI API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("OpenAI API {status}: {body}")));
        }

        let result: OpenAiResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Embedding(format!("Parse error: {e}")))?;
        let mut vector = result
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| DomainError::Embedding("OpenAI API returned no embeddings".into()))?;

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            OpenAiProvider::new(String::new(), None, None, None),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let p = OpenAiProvider::new("sk-test".into(), None, Some("http://localhost:8080/".into()), None).unwrap();
        assert_eq!(p.dimension(), 1536);
        assert_eq!(p.base_url, "http://localhost:8080");
        assert_eq!(p.request_dimensions, None);
    }

    #[test]
    fn test_unknown_model_needs_dimension() {
        let err = OpenAiProvider::new("sk-test".into(), Some("nomic-embed-text".into()), None, None).err().expect("expected config error");
        assert!(matches!(err, DomainError::Config(ref m) if m.contains("nomic-embed-text")));

        let p = OpenAiProvider::new("sk-test".into(), Some("nomic-embed-text".into()), None, Some(768)).unwrap();
        assert_eq!(p.dimension(), 768);
        assert_eq!(p.request_dimensions, None);
    }

    #[test]
    fn test_truncated_text_embedding_3() {
        let p = OpenAiProvider::new("sk-test".into(), Some("text-embedding-3-large".into()), None, Some(256)).unwrap();
        assert_eq!(p.dimension(), 256);
        assert_eq!(p.request_dimensions, Some(256));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(OpenAiProvider::resolve_dimension("nomic-embed-text", Some(0)).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_embedding_error() {
        let p = OpenAiProvider::new("sk-test".into(), None, Some("http://127.0.0.1:9".into()), None).unwrap();
        assert!(matches!(p.embed("hello").await, Err(DomainError::Embedding(_))));
    }
}

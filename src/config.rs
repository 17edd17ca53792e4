//! Runtime configuration, read from `RAGSTORE_*` environment variables.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Result count used when a search does not ask for one.
pub const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Hashing,
    OpenAi,
    FastEmbed,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Hashing => write!(f, "hashing"),
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::FastEmbed => write!(f, "fastembed"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" => Ok(ProviderKind::Hashing),
            "openai" => Ok(ProviderKind::OpenAi),
            "fastembed" => Ok(ProviderKind::FastEmbed),
            _ => Err(DomainError::Config(format!("Unknown embedding provider: {s}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `vector_store_<domain>.json` files.
    pub data_dir: PathBuf,
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Vector size of the configured model. Needed for models the provider has no table entry for.
    pub dimension: Option<usize>,
    /// Upper bound on a single embedding call. Expiry is an embedding failure.
    pub embed_timeout: Option<Duration>,
    /// Default result count for searches issued from the CLI.
    pub top_n: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            provider: ProviderKind::Hashing,
            api_key: None,
            model: None,
            base_url: None,
            dimension: None,
            embed_timeout: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl StoreConfig {
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = StoreConfig::builder();
        if let Some(dir) = lookup("RAGSTORE_DATA_DIR") {
            builder = builder.data_dir(dir);
        }
        if let Some(provider) = lookup("RAGSTORE_EMBEDDING_PROVIDER") {
            builder = builder.provider(provider.parse()?);
        }
        if let Some(key) = lookup("RAGSTORE_EMBEDDING_API_KEY").filter(|k| !k.is_empty()) {
            builder = builder.api_key(key);
        }
        if let Some(model) = lookup("RAGSTORE_EMBEDDING_MODEL").filter(|m| !m.is_empty()) {
            builder = builder.model(model);
        }
        if let Some(url) = lookup("RAGSTORE_EMBEDDING_BASE_URL").filter(|u| !u.is_empty()) {
            builder = builder.base_url(url);
        }
        if let Some(dim) = lookup("RAGSTORE_EMBEDDING_DIMENSION").filter(|d| !d.is_empty()) {
            let dim: usize = dim
                .parse()
                .map_err(|_| DomainError::Config(format!("RAGSTORE_EMBEDDING_DIMENSION is not a number: {dim}")))?;
            builder = builder.dimension(dim);
        }
        if let Some(secs) = lookup("RAGSTORE_EMBED_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| DomainError::Config(format!("RAGSTORE_EMBED_TIMEOUT_SECS is not a number: {secs}")))?;
            builder = builder.embed_timeout(Duration::from_secs(secs));
        }
        if let Some(n) = lookup("RAGSTORE_TOP_N") {
            let n: usize = n
                .parse()
                .map_err(|_| DomainError::Config(format!("RAGSTORE_TOP_N is not a number: {n}")))?;
            builder = builder.top_n(n);
        }
        builder.build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.config.provider = provider;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn dimension(mut self, dimension: usize) -> Self {
        self.config.dimension = Some(dimension);
        self
    }

    pub fn embed_timeout(mut self, timeout: Duration) -> Self {
        self.config.embed_timeout = Some(timeout);
        self
    }

    pub fn top_n(mut self, n: usize) -> Self {
        self.config.top_n = n;
        self
    }

    pub fn build(self) -> Result<StoreConfig, DomainError> {
        if self.config.top_n == 0 {
            return Err(DomainError::Config("top_n must be greater than zero".into()));
        }
        if self.config.dimension == Some(0) {
            return Err(DomainError::Config("embedding dimension must be greater than zero".into()));
        }
        if self.config.embed_timeout == Some(Duration::ZERO) {
            return Err(DomainError::Config("embed timeout must be greater than zero".into()));
        }
        if self.config.provider == ProviderKind::OpenAi && self.config.api_key.is_none() {
            return Err(DomainError::Config(
                "openai provider requires RAGSTORE_EMBEDDING_API_KEY".into(),
            ));
        }
        Ok(self.config)
    }
}

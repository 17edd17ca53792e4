pub mod embeddings;
pub mod json;

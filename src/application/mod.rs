pub mod embedder;
pub mod ingest;
pub mod registry;
pub mod search;
pub mod status;

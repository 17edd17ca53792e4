pub mod embedding_port;
pub mod record_store;

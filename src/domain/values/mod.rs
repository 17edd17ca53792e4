pub mod domain_key;
pub mod embedding;
pub mod similarity;

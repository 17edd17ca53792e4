#[cfg(feature = "fastembed")]
pub mod fastembed;
pub mod hashing;
pub mod lazy;
pub mod openai;

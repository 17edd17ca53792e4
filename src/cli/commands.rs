use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ragstore", about = "Per-domain semantic retrieval store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace a domain's collection with the chunks in a file
    Train {
        /// Domain (erp, hrms)
        domain: String,
        /// JSON array of chunk strings, or plain text with blank-line separated chunks
        file: String,
    },
    /// Return the chunks most similar to a query
    Search {
        /// Domain (erp, hrms)
        domain: String,
        query: String,
        /// Number of results (defaults to RAGSTORE_TOP_N, or 3)
        #[arg(long)]
        top_n: Option<usize>,
        /// Include ids and similarity scores
        #[arg(long)]
        scores: bool,
    },
    /// Show which domains are trained and what is resident
    Status,
}

/// Splits training input into chunks. A JSON array of strings is taken as-is;
/// anything else is split on blank lines, trimming each paragraph.
pub fn parse_chunks(raw: &str) -> Vec<String> {
    if let Ok(chunks) = serde_json::from_str::<Vec<String>>(raw) {
        return chunks;
    }
    raw.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

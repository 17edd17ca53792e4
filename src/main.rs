use clap::Parser;
use ragstore::cli::commands::{parse_chunks, Cli, Commands};
use ragstore::config::StoreConfig;
use ragstore::RagStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let store = match RagStore::new(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error initializing store: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(&store, &config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(store: &RagStore, config: &StoreConfig, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Train { domain, file } => {
            let raw = tokio::fs::read_to_string(&file).await?;
            let chunks = parse_chunks(&raw);
            info!(%domain, file = %file, chunks = chunks.len(), "training domain");
            store.initialize().await?;
            let count = store.add_documents(&chunks, &domain).await?;
            println!("Stored {count} chunks for {domain}");
        }
        Commands::Search {
            domain,
            query,
            top_n,
            scores,
        } => {
            let top_n = top_n.unwrap_or(config.top_n);
            if scores {
                let results = store.search_scored(&query, &domain, top_n).await?;
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                let results = store.search(&query, &domain, top_n).await?;
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
        }
        Commands::Status => {
            let status = store.status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}

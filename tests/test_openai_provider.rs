//! OpenAI-compatible provider against a local stub of `/v1/embeddings`.

use ragstore::config::{ProviderKind, StoreConfig};
use ragstore::domain::error::DomainError;
use ragstore::infrastructure::embeddings::hashing::HashingProvider;
use ragstore::RagStore;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Serves `dimension`-wide vectors for whatever `input` is posted. One request per connection.
async fn spawn_embeddings_server(dimension: usize) -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let hasher = HashingProvider::new(dimension);
        while let Ok((stream, _)) = listener.accept().await {
            respond(stream, &hasher).await;
        }
    });
    (format!("http://{addr}"), handle)
}

async fn respond(mut stream: TcpStream, hasher: &HashingProvider) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    assert!(headers.starts_with("post /v1/embeddings"), "unexpected request: {headers}");
    assert!(headers.contains("authorization: bearer sk-test"));
    let length: usize = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .map(|v| v.trim().parse().unwrap())
        .unwrap_or(0);
    while buf.len() < header_end + length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before body");
        buf.extend_from_slice(&chunk[..n]);
    }

    let request: serde_json::Value = serde_json::from_slice(&buf[header_end..header_end + length]).unwrap();
    assert_eq!(request["model"], "nomic-embed-text");
    assert!(request.get("dimensions").is_none());
    let text = request["input"][0].as_str().unwrap();

    let body = serde_json::json!({ "data": [{ "embedding": hasher.embed_sync(text) }] }).to_string();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.unwrap();
}

fn openai_config(dir: &std::path::Path, base_url: &str) -> ragstore::config::StoreConfigBuilder {
    StoreConfig::builder()
        .data_dir(dir)
        .provider(ProviderKind::OpenAi)
        .api_key("sk-test")
        .model("nomic-embed-text")
        .base_url(base_url)
}

#[tokio::test]
async fn test_configured_dimension_for_self_hosted_model() {
    let (base_url, server) = spawn_embeddings_server(768).await;
    let dir = tempfile::tempdir().unwrap();
    let config = openai_config(dir.path(), &base_url).dimension(768).build().unwrap();
    let store = RagStore::new(&config).unwrap();

    store.initialize().await.unwrap();
    let count = store
        .add_documents(
            &["Purchase orders need two approvals", "Invoices are matched to receipts"],
            "erp",
        )
        .await
        .unwrap();
    assert_eq!(count, 2);

    let results = store.search("invoices matched receipts", "erp", 1).await.unwrap();
    assert_eq!(results, vec!["Invoices are matched to receipts"]);

    let saved = std::fs::read_to_string(dir.path().join("vector_store_erp.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(records[0]["embedding"].as_array().unwrap().len(), 768);

    server.abort();
}

#[tokio::test]
async fn test_unknown_model_without_dimension_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = openai_config(dir.path(), "http://127.0.0.1:9").build().unwrap();
    assert!(matches!(RagStore::new(&config), Err(DomainError::Config(ref m)) if m.contains("nomic-embed-text")));
}

#[tokio::test]
async fn test_wrong_configured_dimension_is_rejected() {
    let (base_url, server) = spawn_embeddings_server(768).await;
    let dir = tempfile::tempdir().unwrap();
    let config = openai_config(dir.path(), &base_url).dimension(1024).build().unwrap();
    let store = RagStore::new(&config).unwrap();

    let err = store.add_documents(&["Vendor master data"], "erp").await.unwrap_err();
    assert!(matches!(err, DomainError::DimensionMismatch { expected: 1024, actual: 768 }));
    assert!(!store.is_trained("erp").await.unwrap());

    server.abort();
}

use vertex_rag::types::retrieval::RetrieveContextsConfig;
use vertex_rag::Client;

#[tokio::main]
async fn main() -> vertex_rag::Result<()> {
    tracing_subscriber::fmt::init();
    let client = Client::from_env()?;
    let Ok(corpus) = std::env::var("VERTEX_RAG_CORPUS") else {
        println!("set VERTEX_RAG_CORPUS to query a corpus.");
        return Ok(());
    };
    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "What programming languages does the candidate know?".to_string());
    let response = client
        .retrieval()
        .retrieve_contexts(&corpus, query, RetrieveContextsConfig::default())
        .await?;
    for context in response.contexts() {
        println!(
            "[{:?}] {}: {}",
            context.score,
            context.source_uri.as_deref().unwrap_or("-"),
            context.text.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

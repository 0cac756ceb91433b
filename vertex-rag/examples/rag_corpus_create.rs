use vertex_rag::types::rag_corpora::CreateRagCorpusConfig;
use vertex_rag::Client;

#[tokio::main]
async fn main() -> vertex_rag::Result<()> {
    tracing_subscriber::fmt::init();
    let client = Client::from_env()?;
    let display_name =
        std::env::var("VERTEX_RAG_CORPUS_NAME").unwrap_or_else(|_| "resumes".to_string());
    let corpus = client
        .rag_corpora()
        .create_and_wait(CreateRagCorpusConfig {
            display_name: Some(display_name),
            description: Some("Corpus created from the vertex-rag examples".into()),
            ..Default::default()
        })
        .await?;
    println!("created: {:?}", corpus.name);
    Ok(())
}

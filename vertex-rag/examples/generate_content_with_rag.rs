use vertex_rag::models::DEFAULT_MODEL;
use vertex_rag::types::models::RagQueryConfig;
use vertex_rag::Client;

#[tokio::main]
async fn main() -> vertex_rag::Result<()> {
    tracing_subscriber::fmt::init();
    let client = Client::from_env()?;
    let Ok(corpus) = std::env::var("VERTEX_RAG_CORPUS") else {
        println!("set VERTEX_RAG_CORPUS to ground answers on a corpus.");
        return Ok(());
    };
    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Summarize the candidate's experience.".to_string());
    let response = client
        .models()
        .generate_content_with_rag(DEFAULT_MODEL, &corpus, prompt, RagQueryConfig::default())
        .await?;
    println!("{}", response.text().unwrap_or_default());
    Ok(())
}

use vertex_rag::types::rag_files::UploadRagFileConfig;
use vertex_rag::Client;

#[tokio::main]
async fn main() -> vertex_rag::Result<()> {
    tracing_subscriber::fmt::init();
    let client = Client::from_env()?;
    let Ok(corpus) = std::env::var("VERTEX_RAG_CORPUS") else {
        println!("set VERTEX_RAG_CORPUS to upload into a corpus.");
        return Ok(());
    };
    let path = std::env::args().nth(1).unwrap_or_else(|| "README.md".to_string());
    let rag_file = client
        .rag_files()
        .upload_from_path(&corpus, &path, UploadRagFileConfig::default())
        .await?;
    println!("uploaded: {:?}", rag_file.name);
    Ok(())
}

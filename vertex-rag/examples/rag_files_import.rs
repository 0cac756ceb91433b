use vertex_rag::types::rag_files::{ImportRagFilesConfig, RagFileTransformationConfig};
use vertex_rag::Client;

#[tokio::main]
async fn main() -> vertex_rag::Result<()> {
    tracing_subscriber::fmt::init();
    let client = Client::from_env()?;
    let (Ok(corpus), Ok(uri)) = (
        std::env::var("VERTEX_RAG_CORPUS"),
        std::env::var("VERTEX_RAG_GCS_URI"),
    ) else {
        println!("set VERTEX_RAG_CORPUS and VERTEX_RAG_GCS_URI (gs://bucket/file.pdf).");
        return Ok(());
    };
    let mut config = ImportRagFilesConfig::from_gcs([uri]);
    config.rag_file_transformation_config =
        Some(RagFileTransformationConfig::fixed_length(512, 100));
    let response = client.rag_files().import_and_wait(&corpus, config).await?;
    println!(
        "imported: {}, failed: {}",
        response.imported_count(),
        response.failed_count()
    );
    Ok(())
}

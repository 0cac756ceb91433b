use vertex_rag::Client;

#[tokio::main]
async fn main() -> vertex_rag::Result<()> {
    tracing_subscriber::fmt::init();
    let client = Client::from_env()?;
    let Ok(corpus) = std::env::var("VERTEX_RAG_CORPUS") else {
        println!("set VERTEX_RAG_CORPUS to the corpus to delete.");
        return Ok(());
    };
    client.rag_corpora().delete_and_wait(&corpus).await?;
    println!("deleted: {corpus}");
    Ok(())
}

use vertex_rag::types::rag_corpora::ListRagCorporaConfig;
use vertex_rag::Client;

#[tokio::main]
async fn main() -> vertex_rag::Result<()> {
    tracing_subscriber::fmt::init();
    let client = Client::from_env()?;
    let corpora = client
        .rag_corpora()
        .all_with_config(ListRagCorporaConfig {
            page_size: Some(100),
            ..Default::default()
        })
        .await?;
    for corpus in corpora {
        println!(
            "{} ({})",
            corpus.name.unwrap_or_default(),
            corpus.display_name.unwrap_or_default()
        );
    }
    Ok(())
}

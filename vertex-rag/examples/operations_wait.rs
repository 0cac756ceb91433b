use std::time::Duration;

use vertex_rag::types::operations::Operation;
use vertex_rag::{Client, PollOptions};

#[tokio::main]
async fn main() -> vertex_rag::Result<()> {
    tracing_subscriber::fmt::init();
    let client = Client::from_env()?;
    let Ok(op_name) = std::env::var("VERTEX_RAG_OPERATION_NAME") else {
        println!("set VERTEX_RAG_OPERATION_NAME to wait for an operation.");
        return Ok(());
    };
    let options = PollOptions::exponential(Duration::from_secs(1), 2.0, Duration::from_secs(30))
        .with_max_wait(Some(Duration::from_secs(600)));
    let op = client
        .operations()
        .wait_until_cancelled(Operation::named(op_name), &options, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    println!("done: {:?}, error: {:?}", op.done, op.error);
    Ok(())
}

use anyhow::Result;
use push_helper::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    flashlearn_server::run().await
}

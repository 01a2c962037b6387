#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cardify_backend::run().await
}

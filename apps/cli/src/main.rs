#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sub2deck::run().await
}

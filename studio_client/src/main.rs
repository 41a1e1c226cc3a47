#[tokio::main]
async fn main() -> std::io::Result<()> {
    studio_client::run_with_config().await
}

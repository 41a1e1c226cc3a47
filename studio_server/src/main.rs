#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Delegate to the framework entry point (config, tracing, bind, serve).
    studio_server::run_with_config().await
}

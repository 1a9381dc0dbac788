#[tokio::main]
async fn main() {
    if let Err(e) = comic_server::run_with_config().await {
        tracing::error!(error = %e, "comic server stopped");
        std::process::exit(1);
    }
}

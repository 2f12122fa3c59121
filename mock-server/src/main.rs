use mock_server::config::ServerConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env();
    let products = if config.seed {
        mock_server::demo_catalog()
    } else {
        Vec::new()
    };

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, seeded = products.len(), "mock catalog listening");
    mock_server::serve(listener, mock_server::app_with(products)).await
}

use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use matrix_gateway::config::ServerConfig;
use matrix_gateway::infrastructure::contracts::config::get_network_config;
use matrix_gateway::{create_router, AppState, GatewayContext};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let server_config = ServerConfig::load()?;

    // A bad network config disables the gateway but keeps the API up
    let context = match get_network_config() {
        Ok(network_config) => {
            info!(?network_config, "Mounting contract gateway");
            let (context, _init) = GatewayContext::mount(network_config);
            context
        }
        Err(e) => {
            error!("Contract gateway disabled: {}", e);
            GatewayContext::unmounted()
        }
    };

    let app = create_router(AppState { context });

    let addr = server_config.socket_addr()?;
    info!("Server running at http://{}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Application shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

//! Vocabulary portal server binary.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vocab_portal::api::api_router;
use vocab_portal::config;
use vocab_portal::portal::PortalState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let portal = Arc::new(PortalState::new());
    tracing::info!(
        data_dir = %portal.data_dir().display(),
        "serving vocabulary data"
    );

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, api_router(portal))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

use std::error::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use grpc_credentials::auth::adapters::grpc::start_server;
use grpc_credentials::config::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting credentials server...");

    // Load configuration
    let settings = Settings::new().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Using {:?} user store", settings.store.provider_type);

    if let Err(e) = start_server(&settings, shutdown_signal()).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    info!("Server stopped");
    Ok(())
}

// Signal handling for graceful shutdown
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

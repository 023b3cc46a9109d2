use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use rideline::api::{start_server, AppState, Metrics, ServerConfig};
use rideline::mailer::{Branding, MailerBackend};
use rideline::sequence::DurableSequenceAllocator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rideline=info".parse()?))
        .init();

    tracing::info!("Rideline starting...");

    let data_dir = std::env::var("RIDELINE_DATA_DIR").unwrap_or_else(|_| "./data".into());
    let allocator = Arc::new(DurableSequenceAllocator::open(&data_dir).await);
    tracing::info!(
        "Booking counter at {}",
        allocator.store().path().display()
    );

    let prefix = std::env::var("RIDELINE_PREFIX").unwrap_or_else(|_| "MDS".into());
    let branding = Branding::from_env();
    let mailer = Arc::new(MailerBackend::from_env()?);

    let state = Arc::new(AppState {
        allocator,
        mailer,
        prefix,
        branding,
        metrics: Arc::new(Metrics::new()),
    });

    let config = ServerConfig {
        host: std::env::var("RIDELINE_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        port: std::env::var("RIDELINE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080),
    };

    start_server(config, state, shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

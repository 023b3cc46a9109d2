mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::contracts::{Mailer, SequenceAllocator};

pub use handlers::{
    AppState, ErrorResponse, Metrics, NewBookingIdResponse, NotificationsResponse, StatsResponse,
};

/// Creates the API router.
pub fn create_router<A: SequenceAllocator + 'static, M: Mailer + 'static>(
    state: Arc<AppState<A, M>>,
) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::get_stats::<A, M>))
        .route("/bookings/new-id", get(handlers::new_booking_id::<A, M>))
        .route(
            "/bookings/notifications",
            post(handlers::send_notifications::<A, M>),
        )
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// Starts the HTTP server.
pub async fn start_server<A, M, F>(
    config: ServerConfig,
    state: Arc<AppState<A, M>>,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    A: SequenceAllocator + 'static,
    M: Mailer + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(state);
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

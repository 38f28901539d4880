use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::auth::require_token;
use super::handlers;
use super::state::AppState;
use crate::config::AppConfig;
use crate::verifier::Verifier;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the application router. `/health` is public, everything under
/// `/v1` goes through the token check.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/v1/:email/verification", get(handlers::verify_single))
        .route("/v1/bulk", post(handlers::verify_bulk))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: Arc<AppConfig>, verifier: Arc<dyn Verifier>) -> std::io::Result<()> {
    let addr = config.listen_addr;
    let app = router(AppState::new(config, verifier));

    let listener = TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;
    info!(addr = %bound, "mailcheck-api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

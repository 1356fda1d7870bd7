pub mod request_id;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{feeds::FeedsController, health};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

use request_id::request_id_middleware;

/// Build the application router.
///
/// The feed endpoint is registered once per recognized path extension, so an
/// unknown extension is a plain routing miss (404) and never reaches the
/// syndication pipeline.
pub fn build_router(pool: Arc<DbPool>, feeds_controller: Arc<FeedsController>) -> Router {
    let feed_routes = Router::new()
        .route("/feeds/videos.xml", get(FeedsController::videos))
        .route("/feeds/videos.rss", get(FeedsController::videos))
        .route("/feeds/videos.rss2", get(FeedsController::videos))
        .route("/feeds/videos.atom", get(FeedsController::videos))
        .route("/feeds/videos.atom1", get(FeedsController::videos))
        .route("/feeds/videos.json", get(FeedsController::videos))
        .route("/feeds/videos.json1", get(FeedsController::videos))
        .with_state(feeds_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(feed_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    feeds_controller: Arc<FeedsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pool, feeds_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

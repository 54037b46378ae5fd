//! API routes.

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{fashion_analysis, health, size_recommendation, try_on};
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/try-on", post(try_on))
        .route("/fashion-analysis", post(fashion_analysis))
        .route("/size-recommendation", post(size_recommendation));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .with_state(state)
}

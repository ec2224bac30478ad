use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use extraction::QueryService;

/// Create the application router with the query API endpoints
pub fn create_router(service: Arc<QueryService>) -> Router {
    // The legacy deployment answered cross-origin requests from a static
    // storefront page, so the API stays wide open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/query", get(handlers::query))
        .with_state(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

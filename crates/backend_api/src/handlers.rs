use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use extraction::QueryService;

pub type ServiceState = Arc<QueryService>;

/// Query parameters accepted by the query endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub token: Option<String>,
    pub action: Option<String>,
}

/// GET /api/query
/// Runs one loyalty query. Every outcome, failure included, is an HTTP 200
/// with a JSON envelope — the clients of the legacy deployment switch on the
/// `success` flag, never on the status code.
pub async fn query(
    State(service): State<ServiceState>,
    Query(params): Query<QueryParams>,
) -> impl IntoResponse {
    tracing::info!(
        action = params.action.as_deref().unwrap_or("customers"),
        "GET /api/query"
    );

    let outcome = service
        .handle(params.token.as_deref(), params.action.as_deref())
        .await;

    Json(outcome)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "loyalty-balance-api"
    }))
}

//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Number of books currently held in memory
    pub books: usize,
    /// Number of authors currently held in memory
    pub authors: usize,
    /// Active biography bound: "min" or "max"
    pub biography_rule: String,
    pub biography_limit: usize,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<crate::AppState>) -> Json<HealthResponse> {
    let validation = &state.config.validation;
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        books: state.services.books.count().await,
        authors: state.services.authors.count().await,
        biography_rule: validation.biography_rule.as_str().to_string(),
        biography_limit: validation.biography_limit,
    })
}

//! Library admin dashboard
//!
//! Manages an in-memory list of books and authors through two validated
//! forms, exposed as a REST JSON API. Nothing is persisted.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Fresh state with empty stores
    pub fn new(config: AppConfig) -> Self {
        let services = services::Services::new(&config.validation);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Books
        .route("/books", get(api::books::list_books).post(api::books::submit_book))
        .route("/books/form", get(api::books::get_book_form))
        .route("/books/edit", delete(api::books::cancel_book_edit))
        .route("/books/:position", delete(api::books::delete_book))
        .route("/books/:position/edit", post(api::books::edit_book))
        // Authors
        .route("/authors", get(api::authors::list_authors).post(api::authors::submit_author))
        .route("/authors/form", get(api::authors::get_author_form))
        .route("/authors/edit", delete(api::authors::cancel_author_edit))
        .route("/authors/:position", delete(api::authors::delete_author))
        .route("/authors/:position/edit", post(api::authors::edit_author))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

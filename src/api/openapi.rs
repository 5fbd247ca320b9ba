//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Admin API",
        version = "0.1.0",
        description = "In-memory book and author management"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Books
        books::list_books,
        books::get_book_form,
        books::submit_book,
        books::edit_book,
        books::cancel_book_edit,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author_form,
        authors::submit_author,
        authors::edit_author,
        authors::cancel_author_edit,
        authors::delete_author,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::Author,
            crate::services::EditMode,
            crate::services::SubmitAction,
            // Books
            books::BookEntry,
            books::BooksListResponse,
            books::BookFormResponse,
            books::BookSubmitResponse,
            // Authors
            authors::AuthorEntry,
            authors::AuthorsListResponse,
            authors::AuthorFormResponse,
            authors::AuthorSubmitResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book form and list"),
        (name = "authors", description = "Author form and list")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

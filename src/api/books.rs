//! Book form endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{FormJson, Position};
use crate::{
    error::AppResult,
    models::Book,
    repository::Entry,
    services::{EditMode, FormView, SubmitAction, Submitted},
};

/// Book as listed on the dashboard
#[derive(Serialize, ToSchema)]
pub struct BookEntry {
    pub id: Uuid,
    pub position: usize,
    /// "{title} by {author} (ISBN: {isbn}) - {publicationDate}"
    pub summary: String,
    pub book: Book,
}

impl BookEntry {
    fn new(position: usize, entry: Entry<Book>) -> Self {
        Self {
            id: entry.id,
            position,
            summary: entry.record.to_string(),
            book: entry.record,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct BooksListResponse {
    pub books: Vec<BookEntry>,
    pub total: usize,
    pub mode: EditMode,
}

/// Book form state
#[derive(Serialize, ToSchema)]
pub struct BookFormResponse {
    /// "Add Book" or "Edit Book"
    pub heading: String,
    /// "Add" or "Update"
    pub submit_label: String,
    pub mode: EditMode,
    pub values: Book,
}

impl From<FormView<Book>> for BookFormResponse {
    fn from(view: FormView<Book>) -> Self {
        Self {
            heading: view.heading,
            submit_label: view.submit_label.to_string(),
            mode: view.mode,
            values: view.values,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct BookSubmitResponse {
    pub action: SubmitAction,
    pub entry: BookEntry,
}

impl From<Submitted<Book>> for BookSubmitResponse {
    fn from(submitted: Submitted<Book>) -> Self {
        Self {
            action: submitted.action,
            entry: BookEntry::new(submitted.position, submitted.entry),
        }
    }
}

/// List books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Books in store order", body = BooksListResponse)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> Json<BooksListResponse> {
    let (entries, mode) = state.services.books.list().await;
    let books: Vec<BookEntry> = entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| BookEntry::new(position, entry))
        .collect();
    Json(BooksListResponse {
        total: books.len(),
        books,
        mode,
    })
}

/// Get the book form (heading, button label, prefilled values)
#[utoipa::path(
    get,
    path = "/books/form",
    tag = "books",
    responses(
        (status = 200, description = "Book form", body = BookFormResponse)
    )
)]
pub async fn get_book_form(State(state): State<crate::AppState>) -> Json<BookFormResponse> {
    Json(state.services.books.form().await.into())
}

/// Submit the book form: adds a book, or updates the one being edited
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book added", body = BookSubmitResponse),
        (status = 200, description = "Book updated", body = BookSubmitResponse),
        (status = 422, description = "Invalid fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_book(
    State(state): State<crate::AppState>,
    FormJson(form): FormJson<Book>,
) -> AppResult<(StatusCode, Json<BookSubmitResponse>)> {
    let submitted = state.services.books.submit(form).await?;
    let status = match submitted.action {
        SubmitAction::Added => StatusCode::CREATED,
        SubmitAction::Updated => StatusCode::OK,
    };
    Ok((status, Json(submitted.into())))
}

/// Start editing the book at a position
#[utoipa::path(
    post,
    path = "/books/{position}/edit",
    tag = "books",
    params(("position" = usize, Path, description = "Book position")),
    responses(
        (status = 200, description = "Book form in edit mode", body = BookFormResponse),
        (status = 404, description = "No book at position", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_book(
    State(state): State<crate::AppState>,
    Position(position): Position,
) -> AppResult<Json<BookFormResponse>> {
    let form = state.services.books.begin_edit(position).await?;
    Ok(Json(form.into()))
}

/// Leave edit mode and reset the book form
#[utoipa::path(
    delete,
    path = "/books/edit",
    tag = "books",
    responses(
        (status = 200, description = "Book form in add mode", body = BookFormResponse)
    )
)]
pub async fn cancel_book_edit(State(state): State<crate::AppState>) -> Json<BookFormResponse> {
    Json(state.services.books.cancel_edit().await.into())
}

/// Delete the book at a position
#[utoipa::path(
    delete,
    path = "/books/{position}",
    tag = "books",
    params(("position" = usize, Path, description = "Book position")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "No book at position", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Position(position): Position,
) -> AppResult<StatusCode> {
    state.services.books.delete(position).await?;
    Ok(StatusCode::NO_CONTENT)
}

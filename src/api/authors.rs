//! Author form endpoints

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
    models::Author,
    repository::Entry,
    services::{EditMode, FormView, SubmitAction, Submitted},
};

/// Author as listed on the dashboard
#[derive(Serialize, ToSchema)]
pub struct AuthorEntry {
    pub id: Uuid,
    pub position: usize,
    /// "{authorName} (Born: {birthDate}) - {biography}"
    pub summary: String,
    pub author: Author,
}

impl AuthorEntry {
    fn new(position: usize, entry: Entry<Author>) -> Self {
        Self {
            id: entry.id,
            position,
            summary: entry.record.to_string(),
            author: entry.record,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AuthorsListResponse {
    pub authors: Vec<AuthorEntry>,
    pub total: usize,
    pub mode: EditMode,
}

/// Author form state
#[derive(Serialize, ToSchema)]
pub struct AuthorFormResponse {
    /// "Add Author" or "Edit Author"
    pub heading: String,
    /// "Add" or "Update"
    pub submit_label: String,
    pub mode: EditMode,
    pub values: Author,
}

impl From<FormView<Author>> for AuthorFormResponse {
    fn from(view: FormView<Author>) -> Self {
        Self {
            heading: view.heading,
            submit_label: view.submit_label.to_string(),
            mode: view.mode,
            values: view.values,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AuthorSubmitResponse {
    pub action: SubmitAction,
    pub entry: AuthorEntry,
}

impl From<Submitted<Author>> for AuthorSubmitResponse {
    fn from(submitted: Submitted<Author>) -> Self {
        Self {
            action: submitted.action,
            entry: AuthorEntry::new(submitted.position, submitted.entry),
        }
    }
}

/// List authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Authors in store order", body = AuthorsListResponse)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> Json<AuthorsListResponse> {
    let (entries, mode) = state.services.authors.list().await;
    let authors: Vec<AuthorEntry> = entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| AuthorEntry::new(position, entry))
        .collect();
    Json(AuthorsListResponse {
        total: authors.len(),
        authors,
        mode,
    })
}

/// Get the author form (heading, button label, prefilled values)
#[utoipa::path(
    get,
    path = "/authors/form",
    tag = "authors",
    responses(
        (status = 200, description = "Author form", body = AuthorFormResponse)
    )
)]
pub async fn get_author_form(State(state): State<crate::AppState>) -> Json<AuthorFormResponse> {
    Json(state.services.authors.form().await.into())
}

/// Submit the author form: adds an author, or updates the one being edited
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = Author,
    responses(
        (status = 201, description = "Author added", body = AuthorSubmitResponse),
        (status = 200, description = "Author updated", body = AuthorSubmitResponse),
        (status = 422, description = "Invalid fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_author(
    State(state): State<crate::AppState>,
    FormJson(form): FormJson<Author>,
) -> AppResult<(StatusCode, Json<AuthorSubmitResponse>)> {
    let submitted = state.services.authors.submit(form).await?;
    let status = match submitted.action {
        SubmitAction::Added => StatusCode::CREATED,
        SubmitAction::Updated => StatusCode::OK,
    };
    Ok((status, Json(submitted.into())))
}

/// Start editing the author at a position
#[utoipa::path(
    post,
    path = "/authors/{position}/edit",
    tag = "authors",
    params(("position" = usize, Path, description = "Author position")),
    responses(
        (status = 200, description = "Author form in edit mode", body = AuthorFormResponse),
        (status = 404, description = "No author at position", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_author(
    State(state): State<crate::AppState>,
    Position(position): Position,
) -> AppResult<Json<AuthorFormResponse>> {
    let form = state.services.authors.begin_edit(position).await?;
    Ok(Json(form.into()))
}

/// Leave edit mode and reset the author form
#[utoipa::path(
    delete,
    path = "/authors/edit",
    tag = "authors",
    responses(
        (status = 200, description = "Author form in add mode", body = AuthorFormResponse)
    )
)]
pub async fn cancel_author_edit(State(state): State<crate::AppState>) -> Json<AuthorFormResponse> {
    Json(state.services.authors.cancel_edit().await.into())
}

/// Delete the author at a position
#[utoipa::path(
    delete,
    path = "/authors/{position}",
    tag = "authors",
    params(("position" = usize, Path, description = "Author position")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "No author at position", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Position(position): Position,
) -> AppResult<StatusCode> {
    state.services.authors.delete(position).await?;
    Ok(StatusCode::NO_CONTENT)
}

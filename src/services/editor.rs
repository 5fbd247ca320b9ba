//! Submission / edit-mode state machine for one record store

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    config::ValidationConfig,
    error::{AppError, AppResult},
    models::FormRecord,
    repository::{Entry, RecordStore},
};

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    Creating,
    Editing { id: Uuid, position: usize },
}

/// What a successful submit did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmitAction {
    Added,
    Updated,
}

#[derive(Debug, Clone)]
pub struct Submitted<T> {
    pub action: SubmitAction,
    pub position: usize,
    pub entry: Entry<T>,
}

/// What the form shows: heading, button label and prefilled values
#[derive(Debug, Clone)]
pub struct FormView<T> {
    pub heading: String,
    pub submit_label: &'static str,
    pub mode: EditMode,
    pub values: T,
}

/// A record store together with its edit-mode reference.
///
/// The edit reference is held as a record id. Deleting the edited record
/// clears it; deleting an earlier record leaves it on the same record.
#[derive(Debug)]
pub struct Editor<T> {
    store: RecordStore<T>,
    editing: Option<Uuid>,
    config: ValidationConfig,
}

impl<T: FormRecord> Editor<T> {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            store: RecordStore::new(),
            editing: None,
            config,
        }
    }

    pub fn mode(&self) -> EditMode {
        match self.editing.and_then(|id| self.store.position_of(id).map(|p| (id, p))) {
            Some((id, position)) => EditMode::Editing { id, position },
            None => EditMode::Creating,
        }
    }

    pub fn list(&self) -> &[Entry<T>] {
        self.store.list()
    }

    /// Start editing the record at `position`
    pub fn begin_edit(&mut self, position: usize) -> AppResult<&Entry<T>> {
        let entry = self.store.get(position)?;
        self.editing = Some(entry.id);
        tracing::debug!(kind = T::KIND, position, "Editing record");
        Ok(entry)
    }

    /// Leave edit mode; returns whether an edit was in progress
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    /// Validate `form` and add it, or apply it to the record being edited
    pub fn submit(&mut self, form: T, today: NaiveDate) -> AppResult<Submitted<T>> {
        if let Err(errors) = form.check(today, &self.config) {
            tracing::debug!(kind = T::KIND, %errors, "Rejected submission");
            return Err(AppError::Validation(errors));
        }

        match self.editing {
            Some(id) => {
                let position = match self.store.position_of(id) {
                    Some(position) => position,
                    None => {
                        self.editing = None;
                        return Err(AppError::NotFound(format!(
                            "{} being edited no longer exists",
                            T::KIND
                        )));
                    }
                };
                let entry = self.store.update(position, form)?.clone();
                self.editing = None;
                tracing::info!(kind = T::KIND, position, "Updated {}", entry.record);
                Ok(Submitted {
                    action: SubmitAction::Updated,
                    position,
                    entry,
                })
            }
            None => {
                let entry = self.store.add(form).clone();
                let position = self.store.len() - 1;
                tracing::info!(kind = T::KIND, position, "Added {}", entry.record);
                Ok(Submitted {
                    action: SubmitAction::Added,
                    position,
                    entry,
                })
            }
        }
    }

    /// Remove the record at `position`
    pub fn delete(&mut self, position: usize) -> AppResult<Entry<T>> {
        let removed = self.store.delete(position)?;
        if self.editing == Some(removed.id) {
            self.editing = None;
            tracing::info!(kind = T::KIND, position, "Deleted record under edit, edit cancelled");
        }
        tracing::info!(kind = T::KIND, position, "Deleted {}", removed.record);
        Ok(removed)
    }

    pub fn form(&self) -> FormView<T> {
        let mode = self.mode();
        match mode {
            EditMode::Creating => FormView {
                heading: format!("Add {}", T::KIND),
                submit_label: "Add",
                mode,
                values: T::default(),
            },
            EditMode::Editing { position, .. } => FormView {
                heading: format!("Edit {}", T::KIND),
                submit_label: "Update",
                mode,
                values: self.store.list()[position].record.clone(),
            },
        }
    }
}

//! Business logic services

pub mod editor;

use std::sync::Arc;

use chrono::Local;
use tokio::sync::RwLock;

use crate::{
    config::ValidationConfig,
    error::AppResult,
    models::{Author, Book, FormRecord},
    repository::Entry,
};
pub use editor::{EditMode, Editor, FormView, SubmitAction, Submitted};

/// Shared handle to one record store and its edit mode
pub struct RecordService<T> {
    editor: Arc<RwLock<Editor<T>>>,
}

impl<T> Clone for RecordService<T> {
    fn clone(&self) -> Self {
        Self {
            editor: Arc::clone(&self.editor),
        }
    }
}

pub type BooksService = RecordService<Book>;
pub type AuthorsService = RecordService<Author>;

impl<T: FormRecord> RecordService<T> {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            editor: Arc::new(RwLock::new(Editor::new(config))),
        }
    }

    /// All records in order, with the current edit mode
    pub async fn list(&self) -> (Vec<Entry<T>>, EditMode) {
        let editor = self.editor.read().await;
        (editor.list().to_vec(), editor.mode())
    }

    pub async fn count(&self) -> usize {
        self.editor.read().await.list().len()
    }

    pub async fn form(&self) -> FormView<T> {
        self.editor.read().await.form()
    }

    /// Submit the form, validated against today's local date
    pub async fn submit(&self, form: T) -> AppResult<Submitted<T>> {
        let today = Local::now().date_naive();
        self.editor.write().await.submit(form, today)
    }

    /// Start editing the record at `position`; returns the form in edit mode
    pub async fn begin_edit(&self, position: usize) -> AppResult<FormView<T>> {
        let mut editor = self.editor.write().await;
        editor.begin_edit(position)?;
        Ok(editor.form())
    }

    /// Leave edit mode; returns the reset form
    pub async fn cancel_edit(&self) -> FormView<T> {
        let mut editor = self.editor.write().await;
        editor.cancel_edit();
        editor.form()
    }

    pub async fn delete(&self, position: usize) -> AppResult<Entry<T>> {
        self.editor.write().await.delete(position)
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: BooksService,
    pub authors: AuthorsService,
}

impl Services {
    /// Create both stores, empty and in creating mode
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            books: BooksService::new(config.clone()),
            authors: AuthorsService::new(config.clone()),
        }
    }
}

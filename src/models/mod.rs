//! Data models for the admin dashboard

pub mod author;
pub mod book;
pub mod validation;

use std::fmt::Display;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::ValidationConfig;
use validation::FieldErrors;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;

/// A record captured by one of the dashboard forms.
///
/// `Display` renders the one-line summary shown in the record list.
pub trait FormRecord: Clone + Default + Serialize + Display + Send + Sync + 'static {
    /// Human name of the record type ("Book", "Author")
    const KIND: &'static str;

    /// Validate the form values as of `today`
    fn check(&self, today: NaiveDate, config: &ValidationConfig) -> Result<(), FieldErrors>;
}

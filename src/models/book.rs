//! Book form and record

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{self, DateMessages, FieldErrors};
use super::FormRecord;
use crate::config::ValidationConfig;

const PUBLICATION_DATE: DateMessages = DateMessages {
    required: "Publication date is required",
    invalid: "Provide a valid publication date",
    future: "Provide a valid publication date",
};

/// Book as captured by the book form and held in the book store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Book {
    /// Book title
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Author name as typed on the form, not linked to the author store
    #[validate(length(min = 1, message = "Author name is required"))]
    pub author: String,
    /// ISBN-10 (last character may be `X`) or ISBN-13, may be left empty
    pub isbn: String,
    /// Publication date (YYYY-MM-DD), not in the future
    pub publication_date: String,
}

impl FormRecord for Book {
    const KIND: &'static str = "Book";

    fn check(&self, today: NaiveDate, _config: &ValidationConfig) -> Result<(), FieldErrors> {
        let mut errors = validation::declared_rules(self);

        if !self.isbn.is_empty() && !validation::is_valid_isbn(&self.isbn) {
            errors.add("isbn", "ISBN must be 10 or 13 digits long");
        }
        validation::check_past_date(
            &mut errors,
            "publicationDate",
            &self.publication_date,
            today,
            &PUBLICATION_DATE,
        );

        errors.into_result()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} (ISBN: {}) - {}",
            self.title, self.author, self.isbn, self.publication_date
        )
    }
}

//! Author form and record

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{self, DateMessages, FieldErrors};
use super::FormRecord;
use crate::config::ValidationConfig;

const BIRTH_DATE: DateMessages = DateMessages {
    required: "Birth date is required",
    invalid: "Birth date must be a valid date",
    future: "Birth date cannot be in the future",
};

/// Author as captured by the author form and held in the author store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    /// Display name
    #[validate(length(min = 1, message = "Author name is required"))]
    pub author_name: String,
    /// Birth date (YYYY-MM-DD), not in the future
    pub birth_date: String,
    /// Free-text biography, length bound set by `validation.biography_rule`
    pub biography: String,
}

impl FormRecord for Author {
    const KIND: &'static str = "Author";

    fn check(&self, today: NaiveDate, config: &ValidationConfig) -> Result<(), FieldErrors> {
        let mut errors = validation::declared_rules(self);

        validation::check_past_date(&mut errors, "birthDate", &self.birth_date, today, &BIRTH_DATE);
        validation::check_text_length(&mut errors, "biography", "Biography", &self.biography, config);

        errors.into_result()
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Born: {}) - {}", self.author_name, self.birth_date, self.biography)
    }
}

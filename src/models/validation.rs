//! Field-level validation shared by the book and author forms.
//!
//! Presence rules are declared on the form structs with `validator`; the rules
//! that depend on the current date or on configuration are checked here and
//! merged into the same [`FieldErrors`] map.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::config::{BiographyRule, ValidationConfig};

/// Wire format of every date field (HTML date input)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// ISBN-10 (9 digits then a digit or `X`) or ISBN-13
static ISBN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{9}[\dX]|\d{13})$").expect("ISBN pattern is valid"));

/// Field name (camelCase, as sent by the form) to a single message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when no field failed
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            if let Some(err) = errs.first() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                fields.add(&camel_case(field.as_ref()), message);
            }
        }
        fields
    }
}

/// Run the derived presence rules of a form
pub fn declared_rules<T: Validate>(form: &T) -> FieldErrors {
    form.validate().err().map(FieldErrors::from).unwrap_or_default()
}

/// `publication_date` -> `publicationDate`
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn is_valid_isbn(isbn: &str) -> bool {
    ISBN_REGEX.is_match(isbn)
}

/// Messages used by [`check_past_date`]
pub struct DateMessages {
    pub required: &'static str,
    pub invalid: &'static str,
    pub future: &'static str,
}

/// A required `YYYY-MM-DD` date that must not be later than `today`
pub fn check_past_date(
    errors: &mut FieldErrors,
    field: &str,
    raw: &str,
    today: NaiveDate,
    messages: &DateMessages,
) {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, messages.required);
        return;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) if date > today => errors.add(field, messages.future),
        Ok(_) => {}
        Err(_) => errors.add(field, messages.invalid),
    }
}

/// Length bound on an optional free-text field; empty text is not checked
pub fn check_text_length(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    text: &str,
    config: &ValidationConfig,
) {
    if text.is_empty() {
        return;
    }
    let len = text.chars().count();
    let limit = config.biography_limit;
    match config.biography_rule {
        BiographyRule::Min if len < limit => errors.add(
            field,
            format!("{} must be at least {} characters long", label, limit),
        ),
        BiographyRule::Max if len > limit => errors.add(
            field,
            format!("{} must be at most {} characters long", label, limit),
        ),
        _ => {}
    }
}

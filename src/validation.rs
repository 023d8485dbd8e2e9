//! Explicit validation for todo payloads.
//!
//! Constraints that the persistence layer relies on are checked here,
//! before anything reaches the database. Violations are reported as
//! structured field-level errors so the API layer can return them in
//! the error envelope.

use serde::Serialize;

use crate::constants::{CONTENT_MAX_LEN, CONTENT_MIN_LEN, TITLE_MAX_LEN, TITLE_MIN_LEN};

/// A single constraint violation, tied to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: String) -> Self {
        Self { field, message }
    }
}

/// Validate a title against the 3-50 character constraint.
pub fn validate_title(title: &str) -> Option<FieldError> {
    let len = title.chars().count();
    if len < TITLE_MIN_LEN || len > TITLE_MAX_LEN {
        return Some(FieldError::new(
            "title",
            format!(
                "title must be between {} and {} characters, got {}",
                TITLE_MIN_LEN, TITLE_MAX_LEN, len
            ),
        ));
    }
    None
}

/// Validate optional content; absent content is always valid.
pub fn validate_content(content: Option<&str>) -> Option<FieldError> {
    let content = content?;
    let len = content.chars().count();
    if len < CONTENT_MIN_LEN || len > CONTENT_MAX_LEN {
        return Some(FieldError::new(
            "content",
            format!(
                "content must be between {} and {} characters, got {}",
                CONTENT_MIN_LEN, CONTENT_MAX_LEN, len
            ),
        ));
    }
    None
}

/// Validate everything a todo payload constrains, collecting all violations.
pub fn validate_todo(title: &str, content: Option<&str>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(err) = validate_title(title) {
        errors.push(err);
    }
    if let Some(err) = validate_content(content) {
        errors.push(err);
    }
    errors
}

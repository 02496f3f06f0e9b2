//! Shape validation for homework-status responses
//!
//! The body is decoded leniently (see [`crate::models::ApiResponse`]); this
//! module enforces that the `homeworks` field exists and is a list before any
//! entry is looked at.

use thiserror::Error;

use crate::models::{ApiResponse, HomeworkEntry};

/// Errors produced while validating the response shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The `homeworks` field is absent from the response
    #[error("response has no `homeworks` field")]
    MissingHomeworksField,

    /// The `homeworks` field is present but not a list
    #[error("`homeworks` field is not a list")]
    NotAList,

    /// A list element could not be decoded as a homework entry
    #[error("malformed homework entry: {0}")]
    MalformedEntry(String),
}

/// Validate a response and extract its homework entries
///
/// Order-preserving and identity on well-formed input, including the empty
/// list.
///
/// # Errors
///
/// [`ValidationError::MissingHomeworksField`] when the field is absent,
/// [`ValidationError::NotAList`] when it holds anything but a JSON array.
pub fn validate(response: &ApiResponse) -> Result<Vec<HomeworkEntry>, ValidationError> {
    let homeworks = response
        .homeworks
        .as_ref()
        .ok_or(ValidationError::MissingHomeworksField)?;

    let items = homeworks.as_array().ok_or(ValidationError::NotAList)?;

    items
        .iter()
        .map(|item| {
            serde_json::from_value(item.clone())
                .map_err(|e| ValidationError::MalformedEntry(e.to_string()))
        })
        .collect()
}

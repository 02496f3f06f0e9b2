//! Status catalog and notification text rendering
//!
//! The review status vocabulary is closed: the API reports `approved`,
//! `reviewing` or `rejected`, and anything else is an error to surface rather
//! than a message to send. Rendering is pure — no I/O, no side effects.

use thiserror::Error;

use crate::models::HomeworkEntry;

/// Errors produced while rendering a notification from a homework entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A required key is absent from the entry
    #[error("homework entry is missing required field `{0}`")]
    MissingField(&'static str),

    /// The status code is not in the catalog
    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),
}

/// Closed set of review statuses the Practicum API reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    /// All statuses in the catalog
    pub const ALL: [ReviewStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Look up a status code, `None` when it is outside the catalog
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// The wire-format status code
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict text for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Render the status-change notification for one homework entry
///
/// # Errors
///
/// Returns [`FormatError::MissingField`] naming the absent key when the entry
/// lacks a name or status, and [`FormatError::UnknownStatus`] when the status
/// code is outside the catalog.
pub fn render_status_change(entry: &HomeworkEntry) -> Result<String, FormatError> {
    let name = entry
        .homework_name
        .as_deref()
        .ok_or(FormatError::MissingField("homework_name"))?;

    let code = entry
        .status
        .as_deref()
        .ok_or(FormatError::MissingField("status"))?;

    let status = ReviewStatus::from_code(code)
        .ok_or_else(|| FormatError::UnknownStatus(code.to_string()))?;

    Ok(format!(
        "Changed review status for \"{name}\". {}",
        status.verdict()
    ))
}

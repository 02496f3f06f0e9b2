//! Wire types for the Practicum homework-status API
//!
//! The API returns a JSON body shaped like:
//!
//! ```json
//! {
//!   "homeworks": [
//!     {"homework_name": "hw1", "status": "approved"}
//!   ],
//!   "current_date": 1000
//! }
//! ```
//!
//! `homeworks` is kept as a raw [`serde_json::Value`] so the validator can
//! tell an absent field apart from one holding the wrong type; entry fields
//! are optional so the formatter can report exactly which key is missing.

use serde::Deserialize;

/// Decoded body of one homework-status poll.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Raw value of the `homeworks` field, `None` when absent.
    #[serde(default)]
    pub homeworks: Option<serde_json::Value>,

    /// Server-reported timestamp used as the next poll cursor.
    #[serde(default)]
    pub current_date: Option<i64>,
}

/// One submission record as reported by the API.
///
/// Fields stay optional through decoding; presence is enforced when the
/// notification text is rendered.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HomeworkEntry {
    /// Display name of the submitted assignment.
    pub homework_name: Option<String>,

    /// Review status code (`approved`, `reviewing`, `rejected`).
    pub status: Option<String>,
}

impl HomeworkEntry {
    /// Convenience constructor used by tests.
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            homework_name: Some(name.into()),
            status: Some(status.into()),
        }
    }
}

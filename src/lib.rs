//! domashka - Yandex Practicum homework review status notifier
//!
//! Polls the Practicum homework-status API on a fixed interval and relays
//! review status changes for the most recent submission to a Telegram chat.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration loading and validation
//! - [`api`] - Practicum API client and response validation
//! - [`status`] - Status catalog and notification text rendering
//! - [`telegram`] - Best-effort Telegram delivery
//! - [`poller`] - The poll loop and its retry policy
//! - [`models`] - Wire types for the Practicum API
//!
//! # Example
//!
//! ```no_run
//! use domashka::config::Config;
//! use domashka::poller::Poller;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!     let mut poller = Poller::new(&config)?;
//!     poller.run().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod status;
pub mod telegram;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{ApiError, PracticumClient};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{ApiResponse, HomeworkEntry};
    pub use crate::poller::{Poller, RetryPolicy};
    pub use crate::status::ReviewStatus;
    pub use crate::telegram::TelegramNotifier;
}

pub use models::{ApiResponse, HomeworkEntry};

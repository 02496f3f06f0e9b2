//! Configuration management for the domashka bot
//!
//! This module handles loading and validating configuration from environment
//! variables. The three credentials (Practicum token, Telegram bot token,
//! Telegram chat id) are required; everything else has a sensible default.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Practicum homework-status endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default delay between poll cycles, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Default append-mode log file
pub const DEFAULT_LOG_FILE: &str = "domashka.log";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Practicum API configuration
    pub api: ApiConfig,

    /// Telegram delivery configuration
    pub telegram: TelegramConfig,

    /// Poll loop configuration
    pub poll: PollConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Practicum API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// OAuth token for the Practicum API
    pub token: String,

    /// Homework-status endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Telegram delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token
    pub bot_token: String,

    /// Destination chat identifier
    pub chat_id: String,
}

/// Poll loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between cycles in seconds
    pub interval_secs: u64,

    /// Maximum fetch attempts per cycle
    pub retry_max_attempts: u32,

    /// Base backoff between fetch attempts, in seconds
    pub retry_backoff_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,

    /// Optional append-mode log file path
    pub file: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("PRACTICUM_TOKEN").unwrap_or_default();
        let bot_token = std::env::var("TELEGRAM_TOKEN").unwrap_or_default();
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").unwrap_or_default();

        let endpoint = std::env::var("DOMASHKA_ENDPOINT")
            .unwrap_or_else(|_| String::from(DEFAULT_ENDPOINT));

        let request_timeout_secs = std::env::var("DOMASHKA_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let interval_secs = std::env::var("DOMASHKA_POLL_INTERVAL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        let retry_max_attempts = std::env::var("DOMASHKA_RETRY_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let retry_backoff_secs = std::env::var("DOMASHKA_RETRY_BACKOFF")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(1);

        let level = std::env::var("DOMASHKA_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let format = std::env::var("DOMASHKA_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        // An empty DOMASHKA_LOG_FILE disables the file log entirely
        let file = match std::env::var("DOMASHKA_LOG_FILE") {
            Ok(path) if path.is_empty() => None,
            Ok(path) => Some(path),
            Err(_) => Some(String::from(DEFAULT_LOG_FILE)),
        };

        Ok(Self {
            api: ApiConfig {
                token,
                endpoint,
                request_timeout_secs,
            },
            telegram: TelegramConfig { bot_token, chat_id },
            poll: PollConfig {
                interval_secs,
                retry_max_attempts,
                retry_backoff_secs,
            },
            logging: LoggingConfig {
                level,
                format,
                file,
            },
        })
    }

    /// Validate configuration values
    ///
    /// Missing credentials are fatal: the loop must not start without all
    /// three (see the startup precondition check in `main`).
    pub fn validate(&self) -> Result<()> {
        if self.api.token.is_empty() {
            bail!("missing required environment variable: PRACTICUM_TOKEN");
        }

        if self.telegram.bot_token.is_empty() {
            bail!("missing required environment variable: TELEGRAM_TOKEN");
        }

        if self.telegram.chat_id.is_empty() {
            bail!("missing required environment variable: TELEGRAM_CHAT_ID");
        }

        if self.poll.interval_secs == 0 {
            bail!("poll interval must be greater than 0");
        }

        if self.poll.retry_max_attempts == 0 {
            bail!("retry_max_attempts must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                token: String::new(),
                endpoint: String::from(DEFAULT_ENDPOINT),
                request_timeout_secs: 30,
            },
            telegram: TelegramConfig {
                bot_token: String::new(),
                chat_id: String::new(),
            },
            poll: PollConfig {
                interval_secs: DEFAULT_POLL_INTERVAL_SECS,
                retry_max_attempts: 3,
                retry_backoff_secs: 1,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
                file: Some(String::from(DEFAULT_LOG_FILE)),
            },
        }
    }
}

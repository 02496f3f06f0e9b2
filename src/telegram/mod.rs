//! Best-effort Telegram delivery
//!
//! Messages go out through the Bot API `sendMessage` method. Delivery is
//! best-effort by contract: a failed send is logged and never propagates, so
//! the poll loop keeps running whatever happens to the chat endpoint.
//! Identical consecutive messages are suppressed so a persistent failure does
//! not spam the chat once per cycle.

use serde::Deserialize;
use thiserror::Error;

use crate::config::TelegramConfig;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Errors that can occur while delivering a message
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Transport-level failure talking to the Bot API
    #[error("telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The Bot API answered with `ok: false`
    #[error("telegram API error: {0}")]
    Api(String),
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram notifier with last-message duplicate suppression
pub struct TelegramNotifier {
    /// HTTP client for Bot API calls
    client: reqwest::Client,

    /// Bot API token
    bot_token: String,

    /// Destination chat identifier
    chat_id: String,

    /// Bot API base URL, overridable for tests
    base_url: String,

    /// Last message successfully delivered
    last_message: Option<String>,
}

impl TelegramNotifier {
    /// Create a notifier from configuration
    pub fn new(config: &TelegramConfig) -> Self {
        Self::with_base_url(config, TELEGRAM_API_BASE)
    }

    /// Create a notifier against an explicit Bot API base URL
    ///
    /// Used by tests to point the notifier at a mock server.
    pub fn with_base_url(config: &TelegramConfig, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            last_message: None,
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }

    /// Whether `text` matches the last successfully delivered message
    pub fn is_duplicate(&self, text: &str) -> bool {
        self.last_message.as_deref() == Some(text)
    }

    /// Send a text message, surfacing delivery failures
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`] on request failure and
    /// [`NotifyError::Api`] when the Bot API answers with `ok: false`
    /// (invalid chat id, revoked token, and the like).
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await?;

        let envelope: BotApiResponse = response.json().await?;
        if !envelope.ok {
            return Err(NotifyError::Api(envelope.description.unwrap_or_default()));
        }

        tracing::info!(chat_id = %self.chat_id, "message delivered");
        Ok(())
    }

    /// Deliver a message best-effort
    ///
    /// Never fails: delivery errors are logged and swallowed, and a message
    /// identical to the last delivered one is skipped. Returns whether the
    /// message actually went out.
    pub async fn notify(&mut self, text: &str) -> bool {
        if self.is_duplicate(text) {
            tracing::debug!("suppressing duplicate message");
            return false;
        }

        match self.send_message(text).await {
            Ok(()) => {
                self.last_message = Some(text.to_string());
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to deliver message, continuing");
                false
            }
        }
    }
}

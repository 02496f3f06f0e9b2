//! The poll loop and its retry policy
//!
//! One cycle is fetch → validate → format → notify, followed by a fixed
//! sleep. The loop never exits on a recoverable error: a failed cycle is
//! logged, reported to the chat best-effort, and retried on the next tick
//! with the cursor unchanged. Only a shutdown signal stops it.

use std::time::Duration;

use crate::api::{validate::validate, ApiError, PracticumClient};
use crate::config::Config;
use crate::error::Result;
use crate::models::ApiResponse;
use crate::status::render_status_change;
use crate::telegram::TelegramNotifier;

/// Bounded retry policy applied around the fetch step
///
/// Kept as explicit control flow in [`Poller::fetch_with_retry`] rather than
/// hidden behind the client; validation and formatting failures are not
/// retried in place, they fail the cycle.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum fetch attempts per cycle
    pub max_attempts: u32,

    /// Backoff before the second attempt; doubles on each further attempt
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// Backoff to wait before the given attempt (1-based; none before the first)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            Duration::ZERO
        } else {
            self.base_backoff * 2_u32.saturating_pow(attempt - 2)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_secs(1),
        }
    }
}

/// What one cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was formatted and delivered
    Notified,

    /// A status change was formatted but not delivered (duplicate or
    /// best-effort delivery failure)
    Skipped,

    /// The homework list was empty; nothing to report
    Empty,
}

/// The polling orchestrator
///
/// Owns the cursor and the last-message cache for the lifetime of the
/// process; nothing is persisted across restarts.
pub struct Poller {
    api: PracticumClient,
    notifier: TelegramNotifier,
    cursor: i64,
    interval: Duration,
    retry: RetryPolicy,
}

impl Poller {
    /// Create a poller from configuration
    ///
    /// The cursor starts at the current time, so the first fetch only sees
    /// homeworks updated from startup onward.
    pub fn new(config: &Config) -> Result<Self> {
        let api = PracticumClient::new(&config.api)?;
        let notifier = TelegramNotifier::new(&config.telegram);

        Ok(Self::from_parts(
            api,
            notifier,
            chrono::Utc::now().timestamp(),
            config.poll_interval(),
            RetryPolicy {
                max_attempts: config.poll.retry_max_attempts,
                base_backoff: Duration::from_secs(config.poll.retry_backoff_secs),
            },
        ))
    }

    /// Assemble a poller from already-built collaborators
    ///
    /// Used by tests to inject mock-server clients and a known cursor.
    pub fn from_parts(
        api: PracticumClient,
        notifier: TelegramNotifier,
        cursor: i64,
        interval: Duration,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            api,
            notifier,
            cursor,
            interval,
            retry,
        }
    }

    /// The current poll cursor (Unix seconds)
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Fetch with the bounded retry policy
    async fn fetch_with_retry(&self) -> std::result::Result<ApiResponse, ApiError> {
        let mut last_error = None;

        for attempt in 1..=self.retry.max_attempts {
            let backoff = self.retry.backoff_for(attempt);
            if !backoff.is_zero() {
                tracing::debug!(attempt, ?backoff, "retrying fetch");
                tokio::time::sleep(backoff).await;
            }

            match self.api.fetch(self.cursor).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "fetch attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ApiError::EndpointUnavailable))
    }

    /// Run one poll cycle
    ///
    /// Only entry index 0 is ever looked at: the API lists the most recent
    /// submission first and this service reports on that submission alone.
    /// That is an intentional domain policy, not an oversight.
    ///
    /// The cursor advances to the response's `current_date` only when the
    /// cycle reaches the end without error, so a failed cycle re-polls the
    /// same window.
    ///
    /// # Errors
    ///
    /// Fetch, validation and formatting errors fail the cycle; all are
    /// recoverable at the loop level. Delivery failures never surface here.
    pub async fn cycle(&mut self) -> Result<CycleOutcome> {
        let response = self.fetch_with_retry().await?;
        let entries = validate(&response)?;

        if entries.is_empty() {
            tracing::info!("homework list is empty, nothing to report");
            self.advance(&response);
            return Ok(CycleOutcome::Empty);
        }

        let message = render_status_change(&entries[0])?;
        let delivered = self.notifier.notify(&message).await;
        self.advance(&response);

        if delivered {
            Ok(CycleOutcome::Notified)
        } else {
            Ok(CycleOutcome::Skipped)
        }
    }

    /// Run the loop until shutdown
    ///
    /// A failed cycle is logged and reported to the chat best-effort (with
    /// duplicate suppression), then the loop sleeps and tries again with the
    /// cursor unchanged. Returns only after a ctrl-c.
    pub async fn run(&mut self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            cursor = self.cursor,
            "poll loop started"
        );

        loop {
            match self.cycle().await {
                Ok(outcome) => {
                    tracing::debug!(?outcome, cursor = self.cursor, "cycle complete");
                }
                Err(e) => {
                    tracing::error!(error = %e, category = ?e.category(), "cycle failed");
                    let report = format!("Сбой в работе программы: {e}");
                    self.notifier.notify(&report).await;
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown requested, stopping poll loop");
                    break;
                }
            }
        }
    }

    fn advance(&mut self, response: &ApiResponse) {
        if let Some(current_date) = response.current_date {
            self.cursor = current_date;
        }
    }
}

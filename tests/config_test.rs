//! Environment-variable configuration tests
//!
//! Serialized because the process environment is shared between tests.

use domashka::config::{Config, DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL_SECS};
use serial_test::serial;

const VARS: &[&str] = &[
    "PRACTICUM_TOKEN",
    "TELEGRAM_TOKEN",
    "TELEGRAM_CHAT_ID",
    "DOMASHKA_ENDPOINT",
    "DOMASHKA_POLL_INTERVAL",
    "DOMASHKA_REQUEST_TIMEOUT",
    "DOMASHKA_RETRY_ATTEMPTS",
    "DOMASHKA_RETRY_BACKOFF",
    "DOMASHKA_LOG_LEVEL",
    "DOMASHKA_LOG_FORMAT",
    "DOMASHKA_LOG_FILE",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.poll.interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    assert_eq!(config.api.request_timeout_secs, 30);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "text");

    // Credentials default to empty, which validation must reject
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn test_full_env_round_trip() {
    clear_env();
    std::env::set_var("PRACTICUM_TOKEN", "practicum-token");
    std::env::set_var("TELEGRAM_TOKEN", "bot-token");
    std::env::set_var("TELEGRAM_CHAT_ID", "42");
    std::env::set_var("DOMASHKA_ENDPOINT", "http://localhost:8080/statuses/");
    std::env::set_var("DOMASHKA_POLL_INTERVAL", "30");
    std::env::set_var("DOMASHKA_RETRY_ATTEMPTS", "5");

    let config = Config::from_env().unwrap();

    assert_eq!(config.api.token, "practicum-token");
    assert_eq!(config.telegram.bot_token, "bot-token");
    assert_eq!(config.telegram.chat_id, "42");
    assert_eq!(config.api.endpoint, "http://localhost:8080/statuses/");
    assert_eq!(config.poll.interval_secs, 30);
    assert_eq!(config.poll.retry_max_attempts, 5);
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_unparsable_numbers_fall_back_to_defaults() {
    clear_env();
    std::env::set_var("DOMASHKA_POLL_INTERVAL", "soon");
    std::env::set_var("DOMASHKA_REQUEST_TIMEOUT", "-1");

    let config = Config::from_env().unwrap();

    assert_eq!(config.poll.interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    assert_eq!(config.api.request_timeout_secs, 30);

    clear_env();
}

#[test]
#[serial]
fn test_empty_log_file_disables_file_logging() {
    clear_env();
    std::env::set_var("DOMASHKA_LOG_FILE", "");

    let config = Config::from_env().unwrap();
    assert!(config.logging.file.is_none());

    clear_env();
}

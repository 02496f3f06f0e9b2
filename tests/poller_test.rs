//! End-to-end poll cycle tests with mock Practicum and Telegram servers
//!
//! Covers the four reference scenarios: a delivered status change, an empty
//! homework list, an unknown status, and an unreachable endpoint — plus the
//! cursor advancement rules across cycles.

use std::time::Duration;

use domashka::api::{ApiError, PracticumClient};
use domashka::config::TelegramConfig;
use domashka::error::Error;
use domashka::poller::{CycleOutcome, Poller, RetryPolicy};
use domashka::status::FormatError;
use domashka::telegram::TelegramNotifier;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APPROVED_VERDICT: &str = "Работа проверена: ревьюеру всё понравилось. Ура!";

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        base_backoff: Duration::ZERO,
    }
}

fn poller_for(api_server_uri: &str, telegram_server_uri: &str, cursor: i64) -> Poller {
    let api = PracticumClient::with_endpoint(
        "practicum-token",
        &format!("{api_server_uri}/homework_statuses/"),
        Duration::from_secs(5),
    )
    .unwrap();

    let config = TelegramConfig {
        bot_token: String::from("123:abc"),
        chat_id: String::from("42"),
    };
    let notifier = TelegramNotifier::with_base_url(&config, telegram_server_uri);

    Poller::from_parts(api, notifier, cursor, Duration::from_secs(600), fast_retry())
}

async fn mount_telegram_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": {}
        })))
        .mount(server)
        .await;
}

/// Scenario 1: an approved homework produces the exact notification text and
/// the cursor advances to current_date
#[tokio::test]
async fn test_status_change_is_delivered() {
    let api_server = MockServer::start().await;
    let telegram_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homework_statuses/"))
        .and(query_param("from_date", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        })))
        .expect(1)
        .mount(&api_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(serde_json::json!({
            "chat_id": "42",
            "text": format!("Changed review status for \"hw1\". {APPROVED_VERDICT}")
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": {}
        })))
        .expect(1)
        .mount(&telegram_server)
        .await;

    let mut poller = poller_for(&api_server.uri(), &telegram_server.uri(), 500);
    let outcome = poller.cycle().await.unwrap();

    assert_eq!(outcome, CycleOutcome::Notified);
    assert_eq!(poller.cursor(), 1000);
}

/// Scenario 2: an empty list is not an error — no notification, cursor
/// advances anyway
#[tokio::test]
async fn test_empty_list_advances_cursor_silently() {
    let api_server = MockServer::start().await;
    let telegram_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [],
            "current_date": 2000
        })))
        .mount(&api_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&telegram_server)
        .await;

    let mut poller = poller_for(&api_server.uri(), &telegram_server.uri(), 500);
    let outcome = poller.cycle().await.unwrap();

    assert_eq!(outcome, CycleOutcome::Empty);
    assert_eq!(poller.cursor(), 2000);
}

/// Scenario 3: an unknown status fails the cycle, nothing is delivered and
/// the cursor stays put
#[tokio::test]
async fn test_unknown_status_fails_cycle_without_delivery() {
    let api_server = MockServer::start().await;
    let telegram_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [{"homework_name": "hw2", "status": "archived"}]
        })))
        .mount(&api_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&telegram_server)
        .await;

    let mut poller = poller_for(&api_server.uri(), &telegram_server.uri(), 500);
    let err = poller.cycle().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Format(FormatError::UnknownStatus(ref status)) if status == "archived"
    ));
    assert_eq!(poller.cursor(), 500);
}

/// Scenario 4: an unreachable endpoint fails the cycle after the bounded
/// retries; the cursor is unchanged for the next attempt
#[tokio::test]
async fn test_unreachable_endpoint_keeps_cursor() {
    // Bind a listener only to learn a free port, then shut it down.
    // (A dropped wiremock MockServer keeps listening — its port is returned
    // to a shared pool — so it cannot be used to get a refused connection.)
    let api_uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let telegram_server = MockServer::start().await;

    let mut poller = poller_for(&api_uri, &telegram_server.uri(), 500);
    let err = poller.cycle().await.unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::EndpointUnavailable)));
    assert_eq!(poller.cursor(), 500);
}

/// A shape error (homeworks present but not a list) fails the cycle with the
/// cursor unchanged
#[tokio::test]
async fn test_not_a_list_fails_cycle() {
    let api_server = MockServer::start().await;
    let telegram_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": "nope",
            "current_date": 3000
        })))
        .mount(&api_server)
        .await;

    let mut poller = poller_for(&api_server.uri(), &telegram_server.uri(), 500);
    let err = poller.cycle().await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(poller.cursor(), 500);
}

/// The next fetch must use exactly the current_date reported by the previous
/// successful cycle
#[tokio::test]
async fn test_cursor_feeds_next_fetch() {
    let api_server = MockServer::start().await;
    let telegram_server = MockServer::start().await;
    mount_telegram_ok(&telegram_server).await;

    Mock::given(method("GET"))
        .and(path("/homework_statuses/"))
        .and(query_param("from_date", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [{"homework_name": "hw1", "status": "reviewing"}],
            "current_date": 1000
        })))
        .expect(1)
        .mount(&api_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/homework_statuses/"))
        .and(query_param("from_date", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [],
            "current_date": 1500
        })))
        .expect(1)
        .mount(&api_server)
        .await;

    let mut poller = poller_for(&api_server.uri(), &telegram_server.uri(), 500);

    assert_eq!(poller.cycle().await.unwrap(), CycleOutcome::Notified);
    assert_eq!(poller.cursor(), 1000);

    assert_eq!(poller.cycle().await.unwrap(), CycleOutcome::Empty);
    assert_eq!(poller.cursor(), 1500);
}

/// A failed cycle leaves the cursor where it was; the retry re-polls the same
/// window
#[tokio::test]
async fn test_failed_cycle_repolls_same_window() {
    let api_server = MockServer::start().await;
    let telegram_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homework_statuses/"))
        .and(query_param("from_date", "500"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api_server)
        .await;

    let mut poller = poller_for(&api_server.uri(), &telegram_server.uri(), 500);

    // Two consecutive failing cycles, both polling from_date=500
    for _ in 0..2 {
        let err = poller.cycle().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::UnexpectedStatusCode(500))));
        assert_eq!(poller.cursor(), 500);
    }

    // Every request carried the unchanged cursor (2 cycles x 2 retry attempts)
    let requests = api_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
}

/// Repeating the same homework state only notifies once
#[tokio::test]
async fn test_repeated_state_is_deduplicated() {
    let api_server = MockServer::start().await;
    let telegram_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homework_statuses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "homeworks": [{"homework_name": "hw1", "status": "rejected"}],
            "current_date": 1000
        })))
        .mount(&api_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": {}
        })))
        .expect(1)
        .mount(&telegram_server)
        .await;

    let mut poller = poller_for(&api_server.uri(), &telegram_server.uri(), 500);

    assert_eq!(poller.cycle().await.unwrap(), CycleOutcome::Notified);
    assert_eq!(poller.cycle().await.unwrap(), CycleOutcome::Skipped);
}

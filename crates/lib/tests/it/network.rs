//! Retry, backoff, and error-classification tests for the network layer.
//!
//! Backoff delays follow the fixed `2^attempt` seconds schedule, so the
//! timed tests keep retry counts small to stay fast.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use cruisemaps::{
    config::ConfigStore,
    network::{NetworkClient, RequestOptions},
};
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::helpers::{spawn_flaky_itinerary_server, spawn_status_server, test_config};

fn client_with_retries(addr: std::net::SocketAddr, max_retries: u32) -> NetworkClient {
    let store = ConfigStore::new();
    let mut config = test_config(addr);
    config.network.max_retries = max_retries;
    store.configure(config);
    NetworkClient::new(store)
}

#[tokio::test]
async fn unconfigured_store_fails_without_any_request() {
    let client = NetworkClient::new(ConfigStore::new());
    let result = client
        .fetch_with_retry("http://127.0.0.1:9/", RequestOptions::default())
        .await;
    assert!(result.is_err_and(|e| e.is_not_configured()));
}

#[tokio::test]
async fn generic_failures_are_retried_with_exponential_backoff() {
    let (addr, state) = spawn_status_server(StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = client_with_retries(addr, 3);

    let started = Instant::now();
    let result = client
        .fetch_with_retry(&format!("http://{addr}/"), RequestOptions::default())
        .await;
    let elapsed = started.elapsed();

    // Exactly three attempts, with 1s + 2s of backoff between them, and the
    // last attempt's error surfaced.
    assert_eq!(state.hits.load(Ordering::SeqCst), 3);
    let err = result.expect_err("request should exhaust retries");
    assert!(err.is_retryable());
    assert!(err.to_string().contains("500"));
    assert!(elapsed >= Duration::from_secs(3));
    assert!(elapsed < Duration::from_secs(10));
}

#[tokio::test]
async fn transport_failures_are_retried() {
    // Nothing listens on the target port; every attempt is a connection error.
    let addr = "127.0.0.1:9".parse().unwrap();
    let client = client_with_retries(addr, 2);

    let unreachable = "http://127.0.0.1:1/";
    let started = Instant::now();
    let result = client
        .fetch_with_retry(unreachable, RequestOptions::default())
        .await;

    let err = result.expect_err("connection should fail");
    assert!(err.is_retryable());
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn rate_limit_is_not_retried_and_skips_backoff() {
    let (addr, state) = spawn_status_server(StatusCode::TOO_MANY_REQUESTS).await;
    let client = client_with_retries(addr, 5);

    let started = Instant::now();
    let result = client
        .fetch_with_retry(&format!("http://{addr}/"), RequestOptions::default())
        .await;

    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
    assert!(result.is_err_and(|e| e.is_rate_limited()));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let (addr, state) = spawn_status_server(StatusCode::UNAUTHORIZED).await;
    let client = client_with_retries(addr, 5);

    let result = client
        .fetch_with_retry(&format!("http://{addr}/"), RequestOptions::default())
        .await;

    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
    assert!(result.is_err_and(|e| e.is_authentication_error()));
}

#[tokio::test]
async fn forbidden_is_not_retried() {
    let (addr, state) = spawn_status_server(StatusCode::FORBIDDEN).await;
    let client = client_with_retries(addr, 5);

    let result = client
        .fetch_with_retry(&format!("http://{addr}/"), RequestOptions::default())
        .await;

    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
    assert!(result.is_err_and(|e| e.is_authentication_error()));
}

#[tokio::test]
async fn transient_failures_recover_within_policy() {
    let (addr, state) = spawn_flaky_itinerary_server(1).await;
    let client = client_with_retries(addr, 3);

    let result = client
        .fetch_with_retry(&format!("http://{addr}/"), RequestOptions::default())
        .await;

    assert!(result.is_ok());
    assert_eq!(state.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn requests_carry_the_bearer_credential_by_default() {
    let (addr, state) = spawn_status_server(StatusCode::OK).await;
    let client = client_with_retries(addr, 1);

    client
        .fetch_with_retry(&format!("http://{addr}/"), RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(
        state.last_authorization.lock().unwrap().as_deref(),
        Some("Bearer test-api-key")
    );
}

#[tokio::test]
async fn caller_headers_can_override_the_bearer_credential() {
    // Documented contract (and documented risk): caller-supplied headers
    // win, the bearer header included.
    let (addr, state) = spawn_status_server(StatusCode::OK).await;
    let client = client_with_retries(addr, 1);

    let mut options = RequestOptions::default();
    options
        .headers
        .insert(AUTHORIZATION, HeaderValue::from_static("Bearer other-key"));
    client
        .fetch_with_retry(&format!("http://{addr}/"), options)
        .await
        .unwrap();

    assert_eq!(
        state.last_authorization.lock().unwrap().as_deref(),
        Some("Bearer other-key")
    );
}

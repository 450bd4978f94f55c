#![allow(clippy::unwrap_used)]
// Integration tests for `ShareClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;
use serde_json::json;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use umistat_api::types::STATS_START_AT_MS;
use umistat_api::{Error, ShareClient, ShareCredential, StatsSnapshot, StatsWindow, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ShareClient) {
    let server = MockServer::start().await;
    let client = ShareClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    (server, client)
}

fn window() -> StatsWindow {
    StatsWindow {
        start_at: STATS_START_AT_MS,
        end_at: 1_754_000_000_000,
        unit: "hour".into(),
        timezone: "Asia/Shanghai".into(),
        page_url: "/".into(),
    }
}

fn share_body(token: &str, website_id: &str) -> serde_json::Value {
    json!({ "token": token, "websiteId": website_id })
}

// ── Share lookup tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_share_lookup_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/share/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(share_body("tok-1", "site-1")))
        .mount(&server)
        .await;

    let credential = client.get_share("abc123").await.unwrap();

    assert_eq!(credential.website_id(), "site-1");
    assert_eq!(credential.token().expose_secret(), "tok-1");
}

#[tokio::test]
async fn test_share_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/share/abc123"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.get_share("abc123").await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_share_empty_token_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/share/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(share_body("", "site-1")))
        .mount(&server)
        .await;

    let result = client.get_share("abc123").await;

    assert!(
        matches!(result, Err(Error::MissingCredential { field: "token" })),
        "expected MissingCredential error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_share_missing_website_id_is_rejected() {
    let (server, client) = setup().await;

    // websiteId absent entirely -> same path as empty
    Mock::given(method("GET"))
        .and(path("/api/share/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-1" })))
        .mount(&server)
        .await;

    let result = client.get_share("abc123").await;

    assert!(
        matches!(result, Err(Error::MissingCredential { field: "websiteId" })),
        "expected MissingCredential error, got: {result:?}"
    );
}

// ── Stats lookup tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_stats_sends_token_and_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/websites/site-1/stats"))
        .and(header("x-umami-share-token", "tok-1"))
        .and(query_param("startAt", STATS_START_AT_MS.to_string()))
        .and(query_param("endAt", "1754000000000"))
        .and(query_param("unit", "hour"))
        .and(query_param("timezone", "Asia/Shanghai"))
        .and(query_param("url", "/"))
        .and(query_param("compare", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageviews": { "value": 42 },
            "visits": { "value": 10 },
            "visitors": { "value": 7 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credential = ShareCredential::new("tok-1", "site-1");
    let snapshot = client.get_stats(&credential, &window()).await.unwrap();

    assert_eq!(
        snapshot,
        StatsSnapshot {
            pageviews: Some(42),
            visits: Some(10),
            visitors: Some(7),
        }
    );
}

#[tokio::test]
async fn test_stats_without_visitors_counter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/websites/site-1/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageviews": { "value": 42 },
            "visits": { "value": 10 }
        })))
        .mount(&server)
        .await;

    let credential = ShareCredential::new("tok-1", "site-1");
    let snapshot = client.get_stats(&credential, &window()).await.unwrap();

    assert_eq!(snapshot.pageviews, Some(42));
    assert_eq!(snapshot.visits, Some(10));
    assert_eq!(snapshot.visitors, None);
}

#[tokio::test]
async fn test_stats_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/websites/site-1/stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let credential = ShareCredential::new("tok-1", "site-1");
    let result = client.get_stats(&credential, &window()).await;

    match result {
        Err(Error::Api { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_stats_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/websites/site-1/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let credential = ShareCredential::new("tok-1", "site-1");
    let result = client.get_stats(&credential, &window()).await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Two-step sequence tests ─────────────────────────────────────────

#[tokio::test]
async fn test_fetch_stats_end_to_end() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/share/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(share_body("tok-1", "site-1")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/websites/site-1/stats"))
        .and(header("x-umami-share-token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageviews": { "value": 42 },
            "visits": { "value": 10 },
            "visitors": { "value": 7 }
        })))
        .mount(&server)
        .await;

    let snapshot = client.fetch_stats("abc123", &window()).await.unwrap();

    assert_eq!(
        snapshot,
        StatsSnapshot {
            pageviews: Some(42),
            visits: Some(10),
            visitors: Some(7),
        }
    );
}

#[tokio::test]
async fn test_fetch_stats_never_hits_stats_after_bad_share() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/share/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(share_body("", "site-1")))
        .mount(&server)
        .await;

    // The stats endpoint must receive zero requests.
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/websites/.*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.fetch_stats("abc123", &window()).await;

    assert!(
        matches!(result, Err(Error::MissingCredential { .. })),
        "expected MissingCredential error, got: {result:?}"
    );
    server.verify().await;
}

#[tokio::test]
async fn test_fetch_stats_never_hits_stats_after_share_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/share/abc123"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/websites/.*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.fetch_stats("abc123", &window()).await;

    assert!(
        matches!(result, Err(Error::Api { status: 500, .. })),
        "expected Api error, got: {result:?}"
    );
    server.verify().await;
}

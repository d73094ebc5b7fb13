//! Integration tests for `ProfileClient` using wiremock HTTP mocks.

use std::time::Duration;

use outreach_enrich::{EnrichError, ProfileClient, ProfileEnricher};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROFILE_URL: &str = "https://www.linkedin.com/in/ada-lovelace";

fn test_client(base_url: &str) -> ProfileClient {
    ProfileClient::with_base_url("test-key", 5, "outreach-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn endpoint(server: &MockServer) -> String {
    format!("{}/person", server.uri())
}

#[tokio::test]
async fn enrich_returns_normalized_profile() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "headline": "Founder at Engines Ltd",
        "city": "London",
        "country_full_name": "United Kingdom",
        "connections": 500,
        "experiences": [{"company": "Engines Ltd", "ends_at": null}]
    });

    Mock::given(method("GET"))
        .and(path("/person"))
        .and(query_param("url", PROFILE_URL))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&endpoint(&server));
    let profile = client.enrich(PROFILE_URL).await.expect("should enrich");

    assert_eq!(profile.first_name, "Ada");
    assert_eq!(profile.full_name, "Ada Lovelace");
    assert_eq!(profile.company_name, "Engines Ltd");
    assert_eq!(profile.location, "London, United Kingdom");
    assert_eq!(profile.connections, "500");
    assert_eq!(profile.followers, "");
}

#[tokio::test]
async fn not_found_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&endpoint(&server));
    let result = client.enrich(PROFILE_URL).await;
    assert!(
        matches!(result, Err(EnrichError::NotFound { ref url }) if url == PROFILE_URL),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_reads_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "17"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&endpoint(&server));
    let result = client.enrich(PROFILE_URL).await;
    assert!(
        matches!(
            result,
            Err(EnrichError::RateLimited {
                retry_after_secs: 17
            })
        ),
        "expected RateLimited(17), got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&endpoint(&server));
    let result = client.enrich(PROFILE_URL).await;
    match result {
        Err(EnrichError::UnexpectedStatus { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&endpoint(&server));
    let result = client.enrich(PROFILE_URL).await;
    assert!(
        matches!(result, Err(EnrichError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn slow_upstream_times_out_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = ProfileClient::with_base_url("test-key", 1, "outreach-test/0.1", &endpoint(&server))
        .expect("client construction should not fail");
    let result = client.enrich(PROFILE_URL).await;
    match result {
        Err(EnrichError::Http(e)) => assert!(e.is_timeout(), "expected timeout, got: {e}"),
        other => panic!("expected Http timeout, got: {other:?}"),
    }
}

//! Integration tests for `ChatClient` using wiremock HTTP mocks.

use outreach_core::{CampaignIntent, PersonalizationContext, Profile, ProspectSummary};
use outreach_personalize::{
    ChatClient, MessagePersonalizer, PersonalizeError, BODY_MAX_CHARS, SUBJECT_MAX_CHARS,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ChatClient {
    ChatClient::with_base_url("test-key", "test-model", 5, "outreach-test/0.1", &server.uri())
        .expect("client construction should not fail")
}

fn prospect() -> ProspectSummary {
    ProspectSummary {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        company: "Engines Ltd".to_string(),
        title: "Founder".to_string(),
    }
}

fn context() -> PersonalizationContext {
    let mut ctx = PersonalizationContext::new("Q3 demos", CampaignIntent::DemoCalls);
    ctx.business.value_proposition = "Ship onboarding flows in a day".to_string();
    ctx
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

#[tokio::test]
async fn generate_returns_parsed_draft() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"subject": "Onboarding at Engines Ltd", "body": "Hi Ada, quick idea."}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let draft = client
        .generate(&prospect(), &context())
        .await
        .expect("should generate");

    assert_eq!(draft.subject, "Onboarding at Engines Ltd");
    assert_eq!(draft.body, "Hi Ada, quick idea.");
}

#[tokio::test]
async fn request_prompt_includes_enriched_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(r#"{"subject":"s","body":"b"}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let profile = Profile {
        headline: "Founder at Engines Ltd".to_string(),
        about: "Building analytical engines.".to_string(),
        ..Profile::default()
    };
    let client = test_client(&server);
    client
        .generate(&prospect(), &context().with_profile(profile))
        .await
        .expect("should generate");

    let requests = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value = requests[0].body_json().expect("json body");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(user.contains("Headline: Founder at Engines Ltd"));
    assert!(user.contains("About: Building analytical engines."));
    assert!(user.contains("Intent: Demo Calls"));
}

#[tokio::test]
async fn over_length_output_is_truncated_not_rejected() {
    let server = MockServer::start().await;

    let content = json!({
        "subject": "S".repeat(180),
        "body": "B".repeat(2400)
    })
    .to_string();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&content)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let draft = client
        .generate(&prospect(), &context())
        .await
        .expect("over-length output should still succeed");

    assert_eq!(draft.subject.chars().count(), SUBJECT_MAX_CHARS);
    assert_eq!(draft.body.chars().count(), BODY_MAX_CHARS);
    assert!(draft.subject.ends_with("..."));
    assert!(draft.body.ends_with("..."));
}

#[tokio::test]
async fn unparseable_content_is_malformed_draft() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("Sure! Here is your email...")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.generate(&prospect(), &context()).await;
    assert!(
        matches!(result, Err(PersonalizeError::MalformedDraft(_))),
        "expected MalformedDraft, got: {result:?}"
    );
}

#[tokio::test]
async fn missing_choices_is_empty_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.generate(&prospect(), &context()).await;
    assert!(
        matches!(result, Err(PersonalizeError::EmptyCompletion)),
        "expected EmptyCompletion, got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "5"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.generate(&prospect(), &context()).await;
    assert!(
        matches!(
            result,
            Err(PersonalizeError::RateLimited {
                retry_after_secs: 5
            })
        ),
        "expected RateLimited(5), got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": {"message": "overloaded"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.generate(&prospect(), &context()).await;
    match result {
        Err(PersonalizeError::UnexpectedStatus { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("overloaded"));
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

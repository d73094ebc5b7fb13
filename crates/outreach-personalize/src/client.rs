//! Chat-completion client for message generation.
//!
//! Sends one `POST {base}/chat/completions` request with a JSON-object
//! response format and parses the first choice's content as a
//! `{subject, body}` pair.

use std::time::Duration;

use async_trait::async_trait;
use outreach_core::{MessageDraft, PersonalizationContext, ProspectSummary};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::caps::enforce_caps;
use crate::error::PersonalizeError;
use crate::prompt::build_prompt;
use crate::MessagePersonalizer;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 700;
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct GeneratedDraft {
    subject: String,
    body: String,
}

/// HTTP client for an OpenAI-compatible chat-completion endpoint.
pub struct ChatClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PersonalizeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PersonalizeError> {
        Self::with_base_url(api_key, model, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (an OpenAI-compatible gateway,
    /// or a mock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`PersonalizeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PersonalizeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Generates a capped draft for one prospect.
    ///
    /// # Errors
    ///
    /// - [`PersonalizeError::RateLimited`] on HTTP 429.
    /// - [`PersonalizeError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`PersonalizeError::Http`] on network failure or timeout.
    /// - [`PersonalizeError::Deserialize`] if the response envelope does not parse.
    /// - [`PersonalizeError::EmptyCompletion`] if no choice carries content.
    /// - [`PersonalizeError::MalformedDraft`] if the content is not a
    ///   non-empty `{subject, body}` object.
    pub async fn generate_draft(
        &self,
        prospect: &ProspectSummary,
        context: &PersonalizationContext,
    ) -> Result<MessageDraft, PersonalizeError> {
        let prompt = build_prompt(prospect, context);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(PersonalizeError::RateLimited { retry_after_secs });
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(PersonalizeError::UnexpectedStatus {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let envelope: ChatResponse =
            serde_json::from_str(&body).map_err(|e| PersonalizeError::Deserialize {
                context: "chat completion response".to_string(),
                source: e,
            })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(PersonalizeError::EmptyCompletion)?;

        parse_draft(&content).map(enforce_caps)
    }
}

/// Parse completion content into a draft. Both fields must be present and
/// non-blank.
fn parse_draft(content: &str) -> Result<MessageDraft, PersonalizeError> {
    let generated: GeneratedDraft = serde_json::from_str(content.trim())
        .map_err(|e| PersonalizeError::MalformedDraft(e.to_string()))?;

    let subject = generated.subject.trim().to_string();
    let body = generated.body.trim().to_string();
    if subject.is_empty() || body.is_empty() {
        return Err(PersonalizeError::MalformedDraft(
            "subject and body must both be non-empty".to_string(),
        ));
    }

    Ok(MessageDraft { subject, body })
}

#[async_trait]
impl MessagePersonalizer for ChatClient {
    async fn generate(
        &self,
        prospect: &ProspectSummary,
        context: &PersonalizationContext,
    ) -> Result<MessageDraft, PersonalizeError> {
        let result = self.generate_draft(prospect, context).await;
        if let Err(e) = &result {
            tracing::debug!(email = %prospect.email, error = %e, "message generation failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_draft_accepts_well_formed_content() {
        let draft = parse_draft(r#" {"subject": " Hi Ada ", "body": "Short note."} "#).unwrap();
        assert_eq!(draft.subject, "Hi Ada");
        assert_eq!(draft.body, "Short note.");
    }

    #[test]
    fn parse_draft_rejects_missing_body() {
        let result = parse_draft(r#"{"subject": "Hi"}"#);
        assert!(matches!(result, Err(PersonalizeError::MalformedDraft(_))));
    }

    #[test]
    fn parse_draft_rejects_blank_fields() {
        let result = parse_draft(r#"{"subject": "Hi", "body": "   "}"#);
        assert!(matches!(result, Err(PersonalizeError::MalformedDraft(_))));
    }

    #[test]
    fn parse_draft_rejects_plain_text() {
        let result = parse_draft("Subject: Hi\n\nBody text");
        assert!(matches!(result, Err(PersonalizeError::MalformedDraft(_))));
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client =
            ChatClient::with_base_url("k", "m", 5, "ua", "https://llm.example.com/v1/").unwrap();
        assert_eq!(client.endpoint, "https://llm.example.com/v1/chat/completions");
    }
}

//! HTTP client for the person-lookup service.
//!
//! One GET per profile URL with bearer authentication. Non-2xx statuses,
//! timeouts, and malformed bodies all come back as [`EnrichError`]; nothing
//! is retried here.

use std::time::Duration;

use async_trait::async_trait;
use outreach_core::Profile;
use reqwest::{Client, StatusCode, Url};

use crate::error::EnrichError;
use crate::normalize::normalize_profile;
use crate::types::RawProfile;
use crate::ProfileEnricher;

const DEFAULT_BASE_URL: &str = "https://nubela.co/proxycurl/api/v2/linkedin";

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Client for the person-lookup REST API.
///
/// Use [`ProfileClient::new`] for production or
/// [`ProfileClient::with_base_url`] to point at a mock server in tests.
pub struct ProfileClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl ProfileClient {
    /// Creates a new client pointed at the production lookup API.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, EnrichError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`EnrichError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, EnrichError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed =
            Url::parse(base_url.trim_end_matches('/')).map_err(|e| EnrichError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
        })
    }

    /// Fetches and normalizes one profile.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::EmptyProfileUrl`] if `profile_url` is blank (no request is made).
    /// - [`EnrichError::NotFound`] on HTTP 404.
    /// - [`EnrichError::RateLimited`] on HTTP 429.
    /// - [`EnrichError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`EnrichError::Http`] on network failure or timeout.
    /// - [`EnrichError::Deserialize`] if the body is not the expected JSON shape.
    pub async fn fetch_profile(&self, profile_url: &str) -> Result<Profile, EnrichError> {
        let profile_url = profile_url.trim();
        if profile_url.is_empty() {
            return Err(EnrichError::EmptyProfileUrl);
        }

        let url = self.build_url(profile_url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
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
            return Err(EnrichError::RateLimited { retry_after_secs });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(EnrichError::NotFound {
                url: profile_url.to_string(),
            });
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(EnrichError::UnexpectedStatus {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let raw: RawProfile =
            serde_json::from_str(&body).map_err(|e| EnrichError::Deserialize {
                context: format!("profile lookup ({profile_url})"),
                source: e,
            })?;

        Ok(normalize_profile(raw))
    }

    fn build_url(&self, profile_url: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("url", profile_url)
            .append_pair("skills", "include")
            .append_pair("use_cache", "if-present")
            .append_pair("fallback_to_cache", "on-error");
        url
    }
}

#[async_trait]
impl ProfileEnricher for ProfileClient {
    async fn enrich(&self, profile_url: &str) -> Result<Profile, EnrichError> {
        let result = self.fetch_profile(profile_url).await;
        if let Err(e) = &result {
            tracing::debug!(profile_url, error = %e, "profile lookup failed");
        }
        result
    }
}

//! HTTP client for the table store's batch-create endpoint.
//!
//! `POST {base_url}/{base_id}/{table}` with up to
//! [`MAX_RECORDS_PER_REQUEST`] records; the response lists the created
//! record ids in request order.

use std::time::Duration;

use async_trait::async_trait;
use outreach_core::PersistableRecord;
use reqwest::{Client, StatusCode, Url};

use crate::error::StoreError;
use crate::fields::{CreateRecord, CreateRecordsRequest, CreateRecordsResponse, RecordFields};
use crate::{RecordStore, MAX_RECORDS_PER_REQUEST};

const DEFAULT_BASE_URL: &str = "https://api.airtable.com/v0";
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Client for one store base.
pub struct TableClient {
    client: Client,
    api_key: String,
    base_url: Url,
    base_id: String,
}

impl TableClient {
    /// Creates a client pointed at the production store API.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        base_id: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        Self::with_base_url(api_key, base_id, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        base_id: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            StoreError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            }
        })?;
        if parsed.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            base_id: base_id.to_owned(),
        })
    }

    /// Builds `{base_url}/{base_id}/{table}` with each segment percent-encoded.
    fn table_url(&self, table: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.base_id).push(table);
        }
        url
    }
}

#[async_trait]
impl RecordStore for TableClient {
    async fn create_batch(
        &self,
        table: &str,
        records: &[PersistableRecord],
    ) -> Result<Vec<String>, StoreError> {
        if records.len() > MAX_RECORDS_PER_REQUEST {
            return Err(StoreError::TooManyRecords {
                count: records.len(),
                max: MAX_RECORDS_PER_REQUEST,
            });
        }
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let request = CreateRecordsRequest {
            records: records
                .iter()
                .map(|r| CreateRecord {
                    fields: RecordFields::from(r),
                })
                .collect(),
            typecast: true,
        };

        let response = self
            .client
            .post(self.table_url(table))
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
                .unwrap_or(30);
            return Err(StoreError::RateLimited { retry_after_secs });
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let created: CreateRecordsResponse =
            serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
                context: format!("create records in {table}"),
                source: e,
            })?;

        if created.records.len() != records.len() {
            return Err(StoreError::IdCountMismatch {
                expected: records.len(),
                got: created.records.len(),
            });
        }

        tracing::debug!(table, count = created.records.len(), "created store records");
        Ok(created.records.into_iter().map(|r| r.id).collect())
    }
}

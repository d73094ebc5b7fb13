use thiserror::Error;

/// Errors returned by the profile enrichment client.
///
/// Every variant is a terminal failure for the prospect being enriched.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("profile URL is empty")]
    EmptyProfileUrl,

    #[error("profile not found: {url}")]
    NotFound { url: String },

    #[error("rate limited by profile lookup service (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from profile lookup: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

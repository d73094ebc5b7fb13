use thiserror::Error;

/// Errors returned by the record store client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by record store (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from record store: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("batch of {count} records exceeds the store limit of {max}")]
    TooManyRecords { count: usize, max: usize },

    #[error("record store returned {got} ids for {expected} records")]
    IdCountMismatch { expected: usize, got: usize },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

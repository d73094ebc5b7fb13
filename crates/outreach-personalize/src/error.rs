use thiserror::Error;

/// Errors returned by the message personalization client.
#[derive(Debug, Error)]
pub enum PersonalizeError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by text generation service (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from text generation: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The completion carried no message content.
    #[error("text generation returned no content")]
    EmptyCompletion,

    /// The content was not a `{subject, body}` object.
    #[error("generated message is malformed: {0}")]
    MalformedDraft(String),
}

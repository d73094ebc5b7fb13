//! Message personalization: builds a campaign-aware prompt, asks a
//! chat-completion service for a structured subject/body pair, and enforces
//! length caps on the result.

pub mod caps;
pub mod client;
pub mod error;
pub mod prompt;
pub mod strategy;

use async_trait::async_trait;
use outreach_core::{MessageDraft, PersonalizationContext, ProspectSummary};

pub use caps::{enforce_caps, BODY_MAX_CHARS, SUBJECT_MAX_CHARS};
pub use client::ChatClient;
pub use error::PersonalizeError;
pub use prompt::{build_prompt, Prompt};

/// Drafts one message. Implementations make at most one outbound call per
/// invocation and never retry.
///
/// Every `Ok` draft satisfies the [`SUBJECT_MAX_CHARS`] and
/// [`BODY_MAX_CHARS`] caps.
#[async_trait]
pub trait MessagePersonalizer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`PersonalizeError`] when the upstream call fails or its
    /// output does not parse as a subject/body pair.
    async fn generate(
        &self,
        prospect: &ProspectSummary,
        context: &PersonalizationContext,
    ) -> Result<MessageDraft, PersonalizeError>;
}

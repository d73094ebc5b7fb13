//! Profile enrichment: one person-lookup call per profile URL, normalized
//! into an [`outreach_core::Profile`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

use async_trait::async_trait;
use outreach_core::Profile;

pub use client::ProfileClient;
pub use error::EnrichError;
pub use normalize::normalize_profile;

/// Looks up a single profile. Implementations make at most one outbound call
/// per invocation and never retry.
#[async_trait]
pub trait ProfileEnricher: Send + Sync {
    /// # Errors
    ///
    /// Returns [`EnrichError`] for any transport, status, or body failure.
    async fn enrich(&self, profile_url: &str) -> Result<Profile, EnrichError>;
}

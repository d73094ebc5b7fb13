//! Per-prospect outcomes, run statistics, and store-ready records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::{CampaignIntent, PersonalizationContext};
use crate::prospect::{Profile, ProspectRef};

/// Generated subject/body pair. Length caps are enforced by the
/// personalization client before a draft is handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub subject: String,
    pub body: String,
}

/// Which step of the per-prospect pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    EnrichmentFailed,
    PersonalizationFailed,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::EnrichmentFailed => write!(f, "enrichment failed"),
            FailureKind::PersonalizationFailed => write!(f, "personalization failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeFailure {
    pub kind: FailureKind,
    pub reason: String,
}

/// What happened to one processed prospect. Created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentOutcome {
    pub prospect: ProspectRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<MessageDraft>,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OutcomeFailure>,
    pub completed_at: DateTime<Utc>,
}

impl EnrichmentOutcome {
    #[must_use]
    pub fn success(prospect: ProspectRef, profile: Option<Profile>, draft: MessageDraft) -> Self {
        Self {
            prospect,
            profile,
            draft: Some(draft),
            succeeded: true,
            error: None,
            completed_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn failure(
        prospect: ProspectRef,
        profile: Option<Profile>,
        kind: FailureKind,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            prospect,
            profile,
            draft: None,
            succeeded: false,
            error: Some(OutcomeFailure {
                kind,
                reason: reason.into(),
            }),
            completed_at: Utc::now(),
        }
    }
}

/// Aggregate counts over the emitted outcomes of one run. Skipped prospects
/// are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// `round(successful / total * 100)`, or `0` for an empty run.
    pub success_rate: u32,
}

impl RunStats {
    #[must_use]
    pub fn from_outcomes(outcomes: &[EnrichmentOutcome]) -> Self {
        let total = outcomes.len();
        let successful = outcomes.iter().filter(|o| o.succeeded).count();
        let failed = total - successful;

        let success_rate = if total == 0 {
            0
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            let rate = (successful as f64 / total as f64 * 100.0).round() as u32;
            rate
        };

        Self {
            total,
            successful,
            failed,
            success_rate,
        }
    }
}

/// Flattened row ready for the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistableRecord {
    pub prospect_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub title: String,
    pub profile_url: String,
    pub location: String,
    pub subject: String,
    pub body: String,
    pub campaign_name: String,
    pub campaign_intent: CampaignIntent,
    /// Tenant identifier, stamped by the batcher before submission.
    pub organization_id: String,
}

impl PersistableRecord {
    /// Flatten a successful outcome. Returns `None` when the outcome failed
    /// or carries no draft.
    ///
    /// Name, company, and title come from the prospect and fall back to the
    /// enriched profile when empty.
    #[must_use]
    pub fn from_outcome(
        outcome: &EnrichmentOutcome,
        context: &PersonalizationContext,
    ) -> Option<Self> {
        if !outcome.succeeded {
            return None;
        }
        let draft = outcome.draft.as_ref()?;
        let prospect = &outcome.prospect;
        let profile = outcome.profile.as_ref();

        let fallback = |own: &str, enriched: fn(&Profile) -> &str| -> String {
            let own = own.trim();
            if own.is_empty() {
                profile.map(enriched).unwrap_or_default().trim().to_string()
            } else {
                own.to_string()
            }
        };

        Some(Self {
            prospect_id: prospect.id.clone(),
            email: prospect.email.trim().to_string(),
            first_name: fallback(&prospect.first_name, |p| p.first_name.as_str()),
            last_name: fallback(&prospect.last_name, |p| p.last_name.as_str()),
            company: fallback(&prospect.company, |p| p.company_name.as_str()),
            title: fallback(&prospect.title, |p| p.headline.as_str()),
            profile_url: prospect.profile_url.trim().to_string(),
            location: profile.map(|p| p.location.clone()).unwrap_or_default(),
            subject: draft.subject.clone(),
            body: draft.body.clone(),
            campaign_name: context.campaign_name.clone(),
            campaign_intent: context.intent,
            organization_id: String::new(),
        })
    }

    /// Names of required identity fields that are empty.
    #[must_use]
    pub fn missing_identity_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.first_name.trim().is_empty() {
            missing.push("first_name");
        }
        if self.last_name.trim().is_empty() {
            missing.push("last_name");
        }
        missing
    }
}

/// Result of a bulk save. `committed_ids` is in submission order, chunks
/// concatenated in the order they were sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceResult {
    pub committed_ids: Vec<String>,
    pub records_committed: usize,
    pub records_failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
}

impl PersistenceResult {
    #[must_use]
    pub fn committed(committed_ids: Vec<String>) -> Self {
        Self {
            records_committed: committed_ids.len(),
            committed_ids,
            records_failed: 0,
            error_reason: None,
        }
    }

    /// Shape a failed save for callers that want the flat result rather than
    /// an error value.
    #[must_use]
    pub fn failed(committed_ids: Vec<String>, attempted: usize, reason: impl Into<String>) -> Self {
        let records_committed = committed_ids.len();
        Self {
            committed_ids,
            records_committed,
            records_failed: attempted.saturating_sub(records_committed),
            error_reason: Some(reason.into()),
        }
    }
}

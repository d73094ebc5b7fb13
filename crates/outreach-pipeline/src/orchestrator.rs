//! Batch enrichment orchestrator.
//!
//! Walks a prospect list strictly in order, one prospect at a time:
//! enrich the profile, draft a message with the profile folded into the
//! campaign context, record the outcome, pause, repeat. A failure on one
//! prospect is captured in its outcome and never stops the run.

use std::collections::HashSet;
use std::time::Duration;

use outreach_core::{
    AppConfig, EnrichmentOutcome, FailureKind, PersonalizationContext, ProspectRef,
    ProspectSummary, RunStats,
};
use outreach_enrich::ProfileEnricher;
use outreach_personalize::MessagePersonalizer;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::pacing::pause;

const DEFAULT_INTER_ITEM_DELAY_MS: u64 = 3000;

/// Per-run knobs supplied by the caller.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Pause between consecutive prospects. Not applied after the last one.
    pub inter_item_delay: Duration,
    /// When set, these prospect ids are processed first. Both groups keep
    /// their input order.
    pub priority_ids: Option<HashSet<String>>,
    pub cancel: CancellationToken,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            inter_item_delay: Duration::from_millis(DEFAULT_INTER_ITEM_DELAY_MS),
            priority_ids: None,
            cancel: CancellationToken::new(),
        }
    }
}

impl RunSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            inter_item_delay: Duration::from_millis(config.inter_item_delay_ms),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_priority<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub outcomes: Vec<EnrichmentOutcome>,
    pub stats: RunStats,
    /// `true` when the run stopped early on cancellation. `outcomes` and
    /// `stats` then cover only the prospects processed before the stop.
    pub cancelled: bool,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Enrich,
    Direct,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Enrich => "enrich",
            Mode::Direct => "direct",
        }
    }
}

/// Drives the enrichment and personalization clients over a prospect list.
pub struct Orchestrator<E, P> {
    enricher: E,
    personalizer: P,
}

impl<E, P> Orchestrator<E, P>
where
    E: ProfileEnricher,
    P: MessagePersonalizer,
{
    #[must_use]
    pub fn new(enricher: E, personalizer: P) -> Self {
        Self {
            enricher,
            personalizer,
        }
    }

    /// Enrich and draft for every prospect with both an email and a profile
    /// URL. Prospects missing either are skipped and produce no outcome.
    pub async fn run(
        &self,
        prospects: &[ProspectRef],
        context: &PersonalizationContext,
        settings: &RunSettings,
    ) -> RunReport {
        let queue = prioritize(
            select(prospects, ProspectRef::is_enrichable),
            settings.priority_ids.as_ref(),
        );
        self.drive(Mode::Enrich, queue, context, settings).await
    }

    /// Draft for every prospect with an email, without calling the
    /// enrichment service. The prompt carries no profile.
    pub async fn run_direct(
        &self,
        prospects: &[ProspectRef],
        context: &PersonalizationContext,
        settings: &RunSettings,
    ) -> RunReport {
        let queue = prioritize(
            select(prospects, |p| !p.email.trim().is_empty()),
            settings.priority_ids.as_ref(),
        );
        self.drive(Mode::Direct, queue, context, settings).await
    }

    async fn drive(
        &self,
        mode: Mode,
        queue: Vec<&ProspectRef>,
        context: &PersonalizationContext,
        settings: &RunSettings,
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "outreach_run",
            %run_id,
            mode = mode.name(),
            campaign = %context.campaign_name,
        );

        async move {
            tracing::info!(prospects = queue.len(), "run started");

            let mut outcomes = Vec::with_capacity(queue.len());
            let mut cancelled = false;

            for (index, prospect) in queue.into_iter().enumerate() {
                if settings.cancel.is_cancelled()
                    || (index > 0 && !pause(settings.inter_item_delay, &settings.cancel).await)
                {
                    tracing::info!(processed = index, "run cancelled");
                    cancelled = true;
                    break;
                }

                let outcome = match mode {
                    Mode::Enrich => self.enrich_and_draft(prospect, context).await,
                    Mode::Direct => self.draft_only(prospect, context).await,
                };
                if let Some(failure) = &outcome.error {
                    tracing::warn!(
                        prospect_id = %prospect.id,
                        kind = %failure.kind,
                        reason = %failure.reason,
                        "prospect failed"
                    );
                }
                outcomes.push(outcome);
            }

            let stats = RunStats::from_outcomes(&outcomes);
            tracing::info!(
                total = stats.total,
                successful = stats.successful,
                failed = stats.failed,
                success_rate = stats.success_rate,
                "run finished"
            );

            RunReport {
                run_id,
                outcomes,
                stats,
                cancelled,
            }
        }
        .instrument(span)
        .await
    }

    async fn enrich_and_draft(
        &self,
        prospect: &ProspectRef,
        context: &PersonalizationContext,
    ) -> EnrichmentOutcome {
        let profile = match self.enricher.enrich(prospect.profile_url.trim()).await {
            Ok(profile) => profile,
            Err(e) => {
                return EnrichmentOutcome::failure(
                    prospect.clone(),
                    None,
                    FailureKind::EnrichmentFailed,
                    e.to_string(),
                );
            }
        };

        let summary = ProspectSummary::from_prospect(prospect, Some(&profile));
        let enriched_context = context.with_profile(profile.clone());

        match self.personalizer.generate(&summary, &enriched_context).await {
            Ok(draft) => EnrichmentOutcome::success(prospect.clone(), Some(profile), draft),
            Err(e) => EnrichmentOutcome::failure(
                prospect.clone(),
                Some(profile),
                FailureKind::PersonalizationFailed,
                e.to_string(),
            ),
        }
    }

    async fn draft_only(
        &self,
        prospect: &ProspectRef,
        context: &PersonalizationContext,
    ) -> EnrichmentOutcome {
        let summary = ProspectSummary::from_prospect(prospect, None);
        match self.personalizer.generate(&summary, context).await {
            Ok(draft) => EnrichmentOutcome::success(prospect.clone(), None, draft),
            Err(e) => EnrichmentOutcome::failure(
                prospect.clone(),
                None,
                FailureKind::PersonalizationFailed,
                e.to_string(),
            ),
        }
    }
}

fn select(prospects: &[ProspectRef], keep: impl Fn(&ProspectRef) -> bool) -> Vec<&ProspectRef> {
    prospects
        .iter()
        .filter(|p| {
            let kept = keep(*p);
            if !kept {
                tracing::debug!(prospect_id = %p.id, "skipping prospect without required identity fields");
            }
            kept
        })
        .collect()
}

/// Stable partition: priority members first, then everyone else.
fn prioritize<'a>(
    queue: Vec<&'a ProspectRef>,
    priority_ids: Option<&HashSet<String>>,
) -> Vec<&'a ProspectRef> {
    let Some(ids) = priority_ids else {
        return queue;
    };
    let (mut ordered, rest): (Vec<_>, Vec<_>) =
        queue.into_iter().partition(|p| ids.contains(&p.id));
    ordered.extend(rest);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prospect(id: &str) -> ProspectRef {
        ProspectRef {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            profile_url: format!("https://linkedin.com/in/{id}"),
            ..ProspectRef::default()
        }
    }

    fn ids(queue: &[&ProspectRef]) -> Vec<String> {
        queue.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn prioritize_is_a_stable_partition() {
        let prospects: Vec<_> = ["A", "B", "C", "D"].into_iter().map(prospect).collect();
        let priority: HashSet<String> = ["C", "A"].into_iter().map(String::from).collect();
        let queue = prioritize(prospects.iter().collect(), Some(&priority));
        assert_eq!(ids(&queue), vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn prioritize_without_set_keeps_input_order() {
        let prospects: Vec<_> = ["B", "A"].into_iter().map(prospect).collect();
        let queue = prioritize(prospects.iter().collect(), None);
        assert_eq!(ids(&queue), vec!["B", "A"]);
    }

    #[test]
    fn prioritize_ignores_unknown_ids() {
        let prospects: Vec<_> = ["A", "B"].into_iter().map(prospect).collect();
        let priority: HashSet<String> = ["Z", "B"].into_iter().map(String::from).collect();
        let queue = prioritize(prospects.iter().collect(), Some(&priority));
        assert_eq!(ids(&queue), vec!["B", "A"]);
    }

    #[test]
    fn select_drops_prospects_missing_identity() {
        let mut no_url = prospect("B");
        no_url.profile_url = String::new();
        let mut blank_email = prospect("C");
        blank_email.email = "  ".to_string();
        let prospects = vec![prospect("A"), no_url, blank_email];

        let queue = select(&prospects, ProspectRef::is_enrichable);
        assert_eq!(ids(&queue), vec!["A"]);
    }

    #[test]
    fn default_settings_use_reference_delay() {
        let settings = RunSettings::default().with_priority(["x"]);
        assert_eq!(settings.inter_item_delay, Duration::from_millis(3000));
        assert!(settings.priority_ids.is_some_and(|ids| ids.contains("x")));
    }
}

//! `run` command handler.
//!
//! Per-prospect failures are part of the printed report and do not make the
//! command fail. A failed save does: the persistence result is printed first,
//! then the error is returned.

use std::path::PathBuf;
use std::time::Duration;

use outreach_core::{
    load_campaign, load_prospects, AppConfig, PersistableRecord, PersistenceResult,
    PersonalizationContext,
};
use outreach_enrich::ProfileClient;
use outreach_personalize::ChatClient;
use outreach_pipeline::{
    BatchSettings, Batcher, CancellationToken, Orchestrator, RunReport, RunSettings,
};
use outreach_store::TableClient;

#[derive(Debug)]
pub(crate) struct RunArgs {
    pub prospects: PathBuf,
    pub campaign: PathBuf,
    pub direct: bool,
    pub priority: Vec<String>,
    pub save_for: Option<String>,
    pub delay_ms: Option<u64>,
}

pub(crate) async fn run_outreach(config: &AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let prospects = load_prospects(&args.prospects)?;
    let context = load_campaign(&args.campaign)?;

    // Fail fast before spending upstream calls on a run that cannot be saved.
    let store_config = match (&args.save_for, &config.store) {
        (Some(_), None) => anyhow::bail!("--save-for requires OUTREACH_STORE_API_KEY to be set"),
        (Some(_), Some(store)) => Some(store),
        (None, _) => None,
    };

    let enricher = ProfileClient::with_base_url(
        &config.enrich_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.enrich_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build profile client: {e}"))?;
    let personalizer = ChatClient::with_base_url(
        &config.llm_api_key,
        &config.llm_model,
        config.request_timeout_secs,
        &config.user_agent,
        &config.llm_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build chat client: {e}"))?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let settings = run_settings(config, &args, cancel.clone());
    let orchestrator = Orchestrator::new(enricher, personalizer);
    let report = if args.direct {
        orchestrator.run_direct(&prospects, &context, &settings).await
    } else {
        orchestrator.run(&prospects, &context, &settings).await
    };

    let persistence = match (args.save_for.as_deref(), store_config) {
        (Some(organization_id), Some(store_config)) => {
            let store = TableClient::with_base_url(
                &store_config.api_key,
                &store_config.base_id,
                config.request_timeout_secs,
                &config.user_agent,
                &store_config.base_url,
            )
            .map_err(|e| anyhow::anyhow!("failed to build store client: {e}"))?;
            let batcher = Batcher::new(
                store,
                store_config.table.clone(),
                BatchSettings::from_config(config).with_cancel(cancel),
            );

            let records = collect_records(&report, &context);
            let attempted = records.len();
            Some(match batcher.save(records, organization_id).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "saving drafts failed");
                    e.to_result(attempted)
                }
            })
        }
        _ => None,
    };

    let output = serde_json::json!({
        "run": report,
        "persistence": persistence,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if let Some(PersistenceResult {
        error_reason: Some(reason),
        ..
    }) = persistence
    {
        anyhow::bail!("failed to save drafts: {reason}");
    }

    Ok(())
}

pub(crate) fn run_settings(
    config: &AppConfig,
    args: &RunArgs,
    cancel: CancellationToken,
) -> RunSettings {
    let mut settings = RunSettings::from_config(config).with_cancel(cancel);
    if let Some(ms) = args.delay_ms {
        settings.inter_item_delay = Duration::from_millis(ms);
    }
    if !args.priority.is_empty() {
        settings = settings.with_priority(args.priority.iter().cloned());
    }
    settings
}

/// Store-ready records for every successful outcome, in run order.
pub(crate) fn collect_records(
    report: &RunReport,
    context: &PersonalizationContext,
) -> Vec<PersistableRecord> {
    report
        .outcomes
        .iter()
        .filter_map(|outcome| PersistableRecord::from_outcome(outcome, context))
        .collect()
}

fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current prospect");
            cancel.cancel();
        }
    });
}

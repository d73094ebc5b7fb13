//! Bulk persistence batcher.
//!
//! Stamps the tenant id onto every record, validates the whole list, then
//! submits it in sequential chunks no larger than the store's per-request
//! cap, pausing between chunks.

use std::time::Duration;

use outreach_core::{AppConfig, PersistableRecord, PersistenceResult, STORE_MAX_CHUNK_SIZE};
use outreach_store::RecordStore;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::PersistError;
use crate::pacing::pause;

const DEFAULT_INTER_CHUNK_DELAY_MS: u64 = 200;

#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Records per create request. Clamped to the store's own cap.
    pub chunk_size: usize,
    /// Pause between consecutive chunks. Not applied after the last one.
    pub inter_chunk_delay: Duration,
    pub cancel: CancellationToken,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            chunk_size: STORE_MAX_CHUNK_SIZE,
            inter_chunk_delay: Duration::from_millis(DEFAULT_INTER_CHUNK_DELAY_MS),
            cancel: CancellationToken::new(),
        }
    }
}

impl BatchSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            inter_chunk_delay: Duration::from_millis(config.inter_chunk_delay_ms),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Saves records into one store table.
pub struct Batcher<S> {
    store: S,
    table: String,
    settings: BatchSettings,
}

impl<S: RecordStore> Batcher<S> {
    #[must_use]
    pub fn new(store: S, table: impl Into<String>, settings: BatchSettings) -> Self {
        Self {
            store,
            table: table.into(),
            settings,
        }
    }

    /// Chunk size actually used: the configured size, capped by the store,
    /// never below one.
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize {
        self.settings
            .chunk_size
            .min(self.store.max_batch_size())
            .max(1)
    }

    /// Persist `records` for `organization_id`.
    ///
    /// An empty list succeeds without touching the store.
    ///
    /// # Errors
    ///
    /// - [`PersistError::ValidationFailed`] if any record (after stamping) is
    ///   missing its email, first name, last name, or organization id. No
    ///   request is sent.
    /// - [`PersistError::BatchSubmitFailed`] if a chunk is rejected. Later
    ///   chunks are not sent; ids from earlier chunks are carried on the error.
    /// - [`PersistError::Cancelled`] if the cancellation token fires between
    ///   chunks.
    pub async fn save(
        &self,
        records: Vec<PersistableRecord>,
        organization_id: &str,
    ) -> Result<PersistenceResult, PersistError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "persist_records",
            %run_id,
            table = %self.table,
            records = records.len(),
        );
        self.save_inner(records, organization_id)
            .instrument(span)
            .await
    }

    async fn save_inner(
        &self,
        records: Vec<PersistableRecord>,
        organization_id: &str,
    ) -> Result<PersistenceResult, PersistError> {
        if records.is_empty() {
            return Ok(PersistenceResult::committed(Vec::new()));
        }

        let organization_id = organization_id.trim();
        let records: Vec<PersistableRecord> = records
            .into_iter()
            .map(|mut record| {
                organization_id.clone_into(&mut record.organization_id);
                record
            })
            .collect();

        for (index, record) in records.iter().enumerate() {
            let mut missing = record.missing_identity_fields();
            if record.organization_id.is_empty() {
                missing.push("organization_id");
            }
            if !missing.is_empty() {
                let reason = format!("missing {}", missing.join(", "));
                tracing::warn!(index, %reason, "record failed validation");
                return Err(PersistError::ValidationFailed { index, reason });
            }
        }

        let chunk_size = self.effective_chunk_size();
        let mut committed_ids: Vec<String> = Vec::with_capacity(records.len());

        for (chunk_index, chunk) in records.chunks(chunk_size).enumerate() {
            if self.settings.cancel.is_cancelled()
                || (chunk_index > 0
                    && !pause(self.settings.inter_chunk_delay, &self.settings.cancel).await)
            {
                tracing::info!(
                    chunk_index,
                    committed = committed_ids.len(),
                    "save cancelled"
                );
                return Err(PersistError::Cancelled { committed_ids });
            }

            match self.store.create_batch(&self.table, chunk).await {
                Ok(ids) => {
                    tracing::info!(chunk_index, count = ids.len(), "chunk committed");
                    committed_ids.extend(ids);
                }
                Err(source) => {
                    tracing::warn!(
                        chunk_index,
                        committed = committed_ids.len(),
                        error = %source,
                        "chunk submission failed"
                    );
                    return Err(PersistError::BatchSubmitFailed {
                        chunk_index,
                        committed_ids,
                        source,
                    });
                }
            }
        }

        tracing::info!(committed = committed_ids.len(), "save finished");
        Ok(PersistenceResult::committed(committed_ids))
    }
}

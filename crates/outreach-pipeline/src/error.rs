use outreach_core::PersistenceResult;
use outreach_store::StoreError;
use thiserror::Error;

/// Terminal failure of one [`crate::Batcher::save`] call.
///
/// Variants that can occur after some chunks were already accepted carry the
/// ids the store assigned to them, so the caller can reconcile.
#[derive(Debug, Error)]
pub enum PersistError {
    /// A record was missing required fields. Nothing was submitted.
    #[error("record {index} failed validation: {reason}")]
    ValidationFailed { index: usize, reason: String },

    #[error(
        "chunk {chunk_index} submission failed after {} records committed: {source}",
        .committed_ids.len()
    )]
    BatchSubmitFailed {
        chunk_index: usize,
        committed_ids: Vec<String>,
        #[source]
        source: StoreError,
    },

    #[error("save cancelled after {} records committed", .committed_ids.len())]
    Cancelled { committed_ids: Vec<String> },
}

impl PersistError {
    /// Ids committed by earlier chunks before the failure.
    #[must_use]
    pub fn committed_ids(&self) -> &[String] {
        match self {
            PersistError::ValidationFailed { .. } => &[],
            PersistError::BatchSubmitFailed { committed_ids, .. }
            | PersistError::Cancelled { committed_ids } => committed_ids,
        }
    }

    /// Flatten into the counts-and-reason shape, given how many records the
    /// caller asked to save.
    #[must_use]
    pub fn to_result(&self, attempted: usize) -> PersistenceResult {
        PersistenceResult::failed(self.committed_ids().to_vec(), attempted, self.to_string())
    }
}

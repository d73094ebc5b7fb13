//! Record store access: batch creation of outreach records in a
//! table-oriented store with a hard per-request record limit.

pub mod client;
pub mod error;
pub mod fields;

use async_trait::async_trait;
use outreach_core::PersistableRecord;

pub use client::TableClient;
pub use error::StoreError;

/// Most records the store accepts in a single create request.
pub const MAX_RECORDS_PER_REQUEST: usize = 10;

/// Creates records in a named table.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upper bound on `records.len()` for one [`RecordStore::create_batch`] call.
    fn max_batch_size(&self) -> usize {
        MAX_RECORDS_PER_REQUEST
    }

    /// Create `records` in one request and return the store-assigned ids in
    /// the same order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the request fails; no records from a failed
    /// call should be assumed committed.
    async fn create_batch(
        &self,
        table: &str,
        records: &[PersistableRecord],
    ) -> Result<Vec<String>, StoreError>;
}

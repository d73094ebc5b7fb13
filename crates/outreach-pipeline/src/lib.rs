//! Sequential orchestration of prospect enrichment and message drafting,
//! plus chunked bulk persistence of the resulting records.
//!
//! Both loops run one item at a time with a fixed pause between items and
//! honour a [`tokio_util::sync::CancellationToken`] between items.

pub mod batcher;
pub mod error;
pub mod orchestrator;
mod pacing;

pub use batcher::{BatchSettings, Batcher};
pub use error::PersistError;
pub use orchestrator::{Orchestrator, RunReport, RunSettings};
pub use tokio_util::sync::CancellationToken;

//! Shared data model and configuration for the prospect outreach pipeline.

pub mod app_config;
pub mod campaign;
pub mod config;
mod files;
pub mod outcome;
pub mod prospect;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, StoreConfig};
pub use campaign::{
    load_campaign, BusinessValue, CampaignIntent, MessageStyle, PersonalizationContext,
    TargetSegment,
};
pub use config::{load_app_config, load_app_config_from_env, STORE_MAX_CHUNK_SIZE};
pub use outcome::{
    EnrichmentOutcome, FailureKind, MessageDraft, OutcomeFailure, PersistableRecord,
    PersistenceResult, RunStats,
};
pub use prospect::{load_prospects, Profile, ProspectRef, ProspectSummary};

/// Errors raised while loading configuration or input files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    FileParse { path: String, reason: String },
}

//! Core domain model for viralens.
//!
//! Holds the catalog/analysis record types shared by the YouTube and Gemini
//! client crates, the pure ranking/filter stage, environment-driven
//! configuration, and the injected credential store used in place of a
//! process-wide key singleton.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod keystore;
pub mod ranking;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use keystore::{FileKeyStore, KeyStore, KeyStoreError, MemoryKeyStore};
pub use ranking::{filter_by_ratio, performance_ratio, rank_by_ratio};
pub use types::{
    format_count, viral_tier, AnalysisResult, CatalogItem, ChannelStatistics, DurationBucket,
    EngagementComment, OutlineSection, ScriptOutline, SuggestedTopic, VideoStatistics,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

//! Shared data model, keyword tables, and configuration for the shelflife
//! expiry estimation engine.

pub mod app_config;
mod builtin;
pub mod config;
pub mod tables;
pub mod telemetry;
pub mod types;

pub use app_config::{EngineConfig, Environment};
pub use config::{load_engine_config, load_engine_config_from_env};
pub use tables::{
    contains_term, load_tables, CategoryRule, DatePattern, DurationPattern, ItemOverride, KeywordTables, Modifier,
    SeasonFactor, SeasonalItem, TablesFile,
};
pub use telemetry::init_tracing;
pub use types::{
    parse_printed_date, ExpiryEstimate, ItemDescriptor, ProductMetadata, ReceiptPrediction,
};

use thiserror::Error;

/// Category label used when nothing more specific is known.
pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read keyword tables file {path}: {source}")]
    TablesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse keyword tables YAML: {0}")]
    TablesFileParse(#[from] serde_yaml::Error),

    #[error("invalid regex for pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("keyword tables validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("{reference} + {days} days is outside the representable date range")]
    DateOutOfRange {
        reference: chrono::NaiveDate,
        days: u32,
    },
}

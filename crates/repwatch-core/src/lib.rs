//! Shared domain records and configuration for repwatch.
//!
//! Mentions arrive from the mention store as loosely-typed [`RawMention`]
//! records and are validated into [`Mention`] before any scoring happens.

pub mod app_config;
pub mod config;
pub mod mentions;
pub mod scoring;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use mentions::{
    normalize_topic, Classification, Intent, Mention, Platform, Priority, RawMention, Sentiment,
};
pub use scoring::{
    load_scoring_config, AlertThresholds, PriorityWeights, ResponsePolicies, ResponsePolicy,
    ScoringConfig,
};

/// Validation failures for a single mention record.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("unrecognized {field} value: '{value}'")]
    UnknownVariant { field: &'static str, value: String },

    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),

    #[error("classification is partially populated; missing {0}")]
    PartialClassification(String),

    #[error("mention id must be non-empty")]
    MissingId,

    #[error("topic '{0}' is empty or not normalized")]
    InvalidTopic(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read scoring config {path}: {source}")]
    ScoringFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring config: {0}")]
    ScoringFileParse(#[from] serde_yaml::Error),

    #[error("invalid scoring config: {0}")]
    Validation(String),
}

//! Core domain model and configuration for smdash.
//!
//! Holds the daily metric record types shared by every crate, the env-based
//! application config, and the `networks.yaml` display/matching config.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod networks;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use networks::{load_networks, NetworkConfig, NetworksFile};
pub use types::{engagement_rate, DateRange, Metric, MetricRecord, MetricTotals, RecordFilter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read networks file {path}: {source}")]
    NetworksFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse networks file: {0}")]
    NetworksFileParse(#[from] serde_yaml::Error),

    #[error("invalid networks config: {0}")]
    Validation(String),
}

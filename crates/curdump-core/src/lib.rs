pub mod app_config;
pub mod config;
pub mod reviews;

use thiserror::Error;

pub use app_config::{AppConfig, DEFAULT_STORE_URL};
pub use config::{load_app_config, load_app_config_from_env};
pub use reviews::{CuratorExport, CuratorInfo, ReviewRecord, Sentiment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

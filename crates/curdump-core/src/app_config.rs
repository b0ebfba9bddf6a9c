use std::path::PathBuf;

/// Store origin used for product links and the curator landing page.
pub const DEFAULT_STORE_URL: &str = "https://store.steampowered.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Store origin without a trailing slash.
    pub store_url: String,
    pub log_level: String,
    /// Directory that preset runs write their JSON exports into.
    pub data_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// Number of recommendations requested per page.
    pub batch_size: u32,
    pub inter_request_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

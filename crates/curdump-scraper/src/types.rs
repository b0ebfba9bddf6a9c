//! Wire and settings types for the curator recommendations feed.
//!
//! ## Observed shape of `ajaxgetfilteredrecommendations/`
//!
//! The endpoint answers with a small JSON envelope:
//!
//! ```json
//! { "success": 1, "total_count": 1234, "results_html": "<div ...>...</div>" }
//! ```
//!
//! `success` has been seen both as `1` and as `true`. Error pages omit
//! `results_html` and `total_count` entirely, so both default to empty/zero.

use curdump_core::AppConfig;
use serde::{Deserialize, Deserializer};

/// One response page from the filtered recommendations endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilteredPage {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub success: bool,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_count: u64,
    #[serde(default)]
    pub results_html: String,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        serde_json::Value::String(s) => matches!(s.trim(), "1" | "true"),
        _ => false,
    })
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Resolved endpoint for one curator's paginated feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredEndpoint {
    /// Absolute URL ending in `ajaxgetfilteredrecommendations/`.
    pub filtered_url: String,
    /// Landing page URL sent as `Referer`.
    pub referer: String,
}

/// HTTP session settings for [`crate::CuratorClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub store_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// Additional attempts after the first failure for retriable errors.
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl From<&AppConfig> for ClientSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            store_url: config.store_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
        }
    }
}

/// Per-run pagination options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Feed ordering, passed through as the `sort` query parameter.
    pub sort: String,
    pub batch_size: u32,
    pub inter_request_delay_ms: u64,
}

impl FetchOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig, sort: impl Into<String>) -> Self {
        Self {
            sort: sort.into(),
            batch_size: config.batch_size,
            inter_request_delay_ms: config.inter_request_delay_ms,
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            sort: "recent".to_owned(),
            batch_size: 50,
            inter_request_delay_ms: 300,
        }
    }
}

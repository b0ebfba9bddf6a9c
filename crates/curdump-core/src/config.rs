use crate::app_config::{AppConfig, DEFAULT_STORE_URL};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const DEFAULT_ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// config. Decoupled from the process environment so tests can drive it
/// with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let store_url = parse_store_url(&or_default("CURDUMP_STORE_URL", DEFAULT_STORE_URL))?;
    let log_level = or_default("CURDUMP_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("CURDUMP_DATA_DIR", "./data"));

    let request_timeout_secs = parse_u64("CURDUMP_REQUEST_TIMEOUT_SECS", "25")?;
    let user_agent = or_default("CURDUMP_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("CURDUMP_ACCEPT_LANGUAGE", DEFAULT_ACCEPT_LANGUAGE);

    let batch_size = parse_u32("CURDUMP_BATCH_SIZE", "50")?;
    if batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CURDUMP_BATCH_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let inter_request_delay_ms = parse_u64("CURDUMP_INTER_REQUEST_DELAY_MS", "300")?;
    let max_retries = parse_u32("CURDUMP_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("CURDUMP_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        store_url,
        log_level,
        data_dir,
        request_timeout_secs,
        user_agent,
        accept_language,
        batch_size,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
    })
}

/// Validate the store origin and drop any trailing slash.
fn parse_store_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "CURDUMP_STORE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{raw}\""),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Credentials are optional here; commands that need them call
/// [`AppConfig::require_youtube_api_key`] / [`AppConfig::require_database_url`]
/// before doing any work.
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

    let database_url = lookup("DATABASE_URL").ok();
    let youtube_api_key = lookup("YOUTUBE_API_KEY").ok();
    let youtube_base_url = lookup("INFL_YOUTUBE_BASE_URL").ok();

    let env = parse_environment(&or_default("INFL_ENV", "development"))?;
    let log_level = or_default("INFL_LOG_LEVEL", "info");
    let categories_path =
        PathBuf::from(or_default("INFL_CATEGORIES_PATH", "./config/categories.yaml"));

    let youtube_request_timeout_secs = parse_u64("INFL_YOUTUBE_REQUEST_TIMEOUT_SECS", "30")?;

    let db_max_connections = parse_u32("INFL_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("INFL_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("INFL_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let search_max_results = parse_u32("INFL_SEARCH_MAX_RESULTS", "10")?;
    if !(1..=50).contains(&search_max_results) {
        return Err(ConfigError::InvalidEnvVar {
            var: "INFL_SEARCH_MAX_RESULTS".to_string(),
            reason: format!("{search_max_results} is outside the API range 1..=50"),
        });
    }
    let recent_video_sample = parse_u32("INFL_RECENT_VIDEO_SAMPLE", "10")?;
    if !(1..=50).contains(&recent_video_sample) {
        return Err(ConfigError::InvalidEnvVar {
            var: "INFL_RECENT_VIDEO_SAMPLE".to_string(),
            reason: format!("{recent_video_sample} is outside the API range 1..=50"),
        });
    }
    let inter_request_delay_ms = parse_u64("INFL_INTER_REQUEST_DELAY_MS", "1000")?;
    let quota_cooldown_secs = parse_u64("INFL_QUOTA_COOLDOWN_SECS", "3600")?;
    let quota_max_retries = parse_u32("INFL_QUOTA_MAX_RETRIES", "1")?;

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        categories_path,
        youtube_api_key,
        youtube_base_url,
        youtube_request_timeout_secs,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        search_max_results,
        recent_video_sample,
        inter_request_delay_ms,
        quota_cooldown_secs,
        quota_max_retries,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INFL_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

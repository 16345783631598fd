use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub categories_path: PathBuf,
    pub youtube_api_key: Option<String>,
    pub youtube_base_url: Option<String>,
    pub youtube_request_timeout_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub search_max_results: u32,
    pub recent_video_sample: u32,
    pub inter_request_delay_ms: u64,
    pub quota_cooldown_secs: u64,
    pub quota_max_retries: u32,
}

impl AppConfig {
    /// Whether log lines carry ANSI colour codes; off in production.
    #[must_use]
    pub fn ansi_logs(&self) -> bool {
        self.env != Environment::Production
    }

    /// Returns the `YouTube` Data API key, or fails before any work starts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `YOUTUBE_API_KEY` is unset or blank.
    pub fn require_youtube_api_key(&self) -> Result<&str, ConfigError> {
        self.youtube_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("YOUTUBE_API_KEY".to_string()))
    }

    /// Returns the Postgres connection string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DATABASE_URL` is unset or blank.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("categories_path", &self.categories_path)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_base_url", &self.youtube_base_url)
            .field(
                "youtube_request_timeout_secs",
                &self.youtube_request_timeout_secs,
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("search_max_results", &self.search_max_results)
            .field("recent_video_sample", &self.recent_video_sample)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("quota_cooldown_secs", &self.quota_cooldown_secs)
            .field("quota_max_retries", &self.quota_max_retries)
            .finish()
    }
}

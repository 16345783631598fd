pub mod app_config;
pub mod categories;
pub mod config;
pub mod language;
pub mod record;

pub use app_config::{AppConfig, Environment};
pub use categories::{load_categories, CategoriesFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use language::{LanguageProfile, ScriptBlock};
pub use record::{InfluencerRecord, SocialLinks, VideoStats};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("invalid categories configuration: {0}")]
    Validation(String),
}

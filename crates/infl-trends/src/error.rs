use std::path::PathBuf;

use infl_youtube::YouTubeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error(transparent)]
    YouTube(#[from] YouTubeError),

    #[error("failed to write trend report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize trend report: {0}")]
    Serialize(#[from] serde_json::Error),
}

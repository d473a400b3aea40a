use std::path::PathBuf;

use drawcast_core::PeriodError;
use thiserror::Error;

/// Failure while turning fetched draws into documents.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("upstream returned no draws")]
    NoResults,

    #[error("cannot compute next period: {0}")]
    Period(#[from] PeriodError),

    #[error("JSON serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure writing one output file.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
}

use std::path::PathBuf;

use thiserror::Error;

/// Result type for schema snapshot operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema snapshot")]
    Json(#[from] serde_json::Error),

    #[error("column '{column}' claims table '{claimed}' but is listed under '{table}'")]
    OrphanColumn {
        table: String,
        column: String,
        claimed: String,
    },
}

// In crates/database/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to connect to the database")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database operation failed")]
    OperationFailed(#[source] sqlx::Error),

    #[error("Failed to read trades file {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed trades file: {0}")]
    MalformedFile(#[from] serde_json::Error),

    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration")]
    LoadError(#[from] config::ConfigError),

    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

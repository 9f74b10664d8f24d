// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, DatabaseSettings, Settings, SourceKind, SourceSettings};

/// Loads the application settings from the `config/` directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from("config")
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
///
/// The result is not validated here: callers may still override the source
/// and should call [`Settings::validate`] once they are done.
pub fn load_settings_from(config_dir: &str) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("JOURNAL_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::with_name(&format!("{config_dir}/base")))
        .add_source(File::with_name(&format!("{config_dir}/{environment}")).required(false))
        // e.g. `JOURNAL__SOURCE__KIND=postgres`
        .add_source(Environment::with_prefix("JOURNAL").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

impl Settings {
    /// Checks that the selected trade source has what it needs to connect.
    pub fn validate(&self) -> Result<()> {
        match self.source.kind {
            SourceKind::Json if self.source.path.is_none() => {
                Err(Error::MissingSetting("source.path"))
            }
            SourceKind::Postgres if self.source.database.is_none() => {
                Err(Error::MissingSetting("source.database.url"))
            }
            _ => Ok(()),
        }
    }
}

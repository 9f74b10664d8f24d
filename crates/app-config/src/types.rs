// In crates/app-config/src/types.rs

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Where trades are read from.
    pub source: SourceSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// The kinds of trade store the journal can read from.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Json,
    Postgres,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceSettings {
    pub kind: SourceKind,
    /// Path of the trades file when `kind = "json"`.
    pub path: Option<String>,
    /// Connection settings when `kind = "postgres"`.
    pub database: Option<DatabaseSettings>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    /// The connection URL for the PostgreSQL database.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Restricts reads to one journal owner; all rows are read when unset.
    pub user_id: Option<String>,
}

// Helper functions for serde defaults
fn default_log_level() -> String { "info".to_string() }
fn default_max_connections() -> u32 { 5 }

// In crates/database/src/lib.rs

use app_config::{SourceKind, SourceSettings};
use async_trait::async_trait;
use core_types::Trade;

pub mod error;
pub mod json_file;
pub mod postgres;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use json_file::JsonFileSource;
pub use postgres::{Db, connect};

/// The universal interface for wherever journal trades are stored.
///
/// The metrics engine never talks to storage itself: callers fetch a snapshot
/// through a `TradeSource` and hand the trades over. Tests supply an in-memory
/// implementation instead of a real store.
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// A short label for logs (e.g. "postgres", "json-file").
    fn name(&self) -> &'static str;

    /// Returns every trade visible to this source, in no guaranteed order.
    async fn fetch_trades(&self) -> Result<Vec<Trade>>;
}

/// Opens the trade source selected in the settings.
pub async fn open_source(settings: &SourceSettings) -> Result<Box<dyn TradeSource>> {
    match settings.kind {
        SourceKind::Json => {
            let path = settings
                .path
                .as_ref()
                .ok_or(Error::MissingSetting("source.path"))?;
            Ok(Box::new(JsonFileSource::new(path)))
        }
        SourceKind::Postgres => {
            let database = settings
                .database
                .as_ref()
                .ok_or(Error::MissingSetting("source.database.url"))?;
            Ok(Box::new(connect(database).await?))
        }
    }
}

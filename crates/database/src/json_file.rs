// In crates/database/src/json_file.rs

use crate::error::{Error, Result};
use crate::TradeSource;
use async_trait::async_trait;
use core_types::Trade;
use std::path::{Path, PathBuf};

/// Reads trades from a JSON array on disk, e.g. a journal export.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TradeSource for JsonFileSource {
    fn name(&self) -> &'static str {
        "json-file"
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::FileRead {
                path: self.path.clone(),
                source,
            })?;

        let trades: Vec<Trade> = serde_json::from_str(&content)?;
        tracing::debug!(count = trades.len(), path = %self.path.display(), "Loaded trades file.");
        Ok(trades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TradeStatus;
    use rust_decimal_macros::dec;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("journal-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn loads_a_journal_export() {
        let path = scratch_file(
            "export.json",
            r#"[
                {"id": "1", "symbol": "AAPL", "trade_type": "long", "market_type": "stock",
                 "quantity": 50, "entry_price": 150.25, "exit_price": 155.75,
                 "profit_loss": 275.00, "entry_time": "2024-01-15T10:30:00Z",
                 "exit_time": "2024-01-16T14:45:00Z", "status": "closed"},
                {"id": "2", "symbol": "BTCUSD", "quantity": "0.5",
                 "entry_time": "2024-01-17T08:00:00Z", "status": "open"}
            ]"#,
        );

        let trades = JsonFileSource::new(&path).fetch_trades().await.unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].profit_loss, Some(dec!(275)));
        assert_eq!(trades[1].status, TradeStatus::Open);
        assert_eq!(trades[1].quantity, dec!(0.5));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn missing_file_reports_its_path() {
        let source = JsonFileSource::new("/nonexistent/journal/trades.json");
        match source.fetch_trades().await {
            Err(Error::FileRead { path, .. }) => assert_eq!(path, source.path()),
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_file_is_rejected() {
        let path = scratch_file("broken.json", r#"{"not": "an array"}"#);
        let result = JsonFileSource::new(&path).fetch_trades().await;
        assert!(matches!(result, Err(Error::MalformedFile(_))));
        std::fs::remove_file(path).ok();
    }
}

// In crates/database/src/postgres.rs

use crate::error::{Error, Result};
use crate::TradeSource;
use app_config::DatabaseSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Symbol, Trade, TradeId, TradeStatus};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, postgres::PgPoolOptions};

/// A wrapper around the `sqlx` connection pool, optionally scoped to one journal owner.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    user_id: Option<String>,
}

/// Establishes a connection pool to the PostgreSQL trade store.
///
/// # Arguments
///
/// * `settings`: The database configuration settings.
///
/// # Returns
///
/// A `Result` containing the `Db` wrapper on success, or an `Error` on failure.
pub async fn connect(settings: &DatabaseSettings) -> Result<Db> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        // The `?` operator uses the `#[from]` attribute in our error enum
        // to automatically convert the `sqlx::Error` into a `database::Error`.
        .connect(&settings.url)
        .await?;

    tracing::info!(scoped = settings.user_id.is_some(), "Connected to the trade store.");

    Ok(Db {
        pool,
        user_id: settings.user_id.clone(),
    })
}

/// Row shape of the `trades` table. Ids are read as text so either UUID or
/// text keys work.
#[derive(Debug, FromRow)]
struct TradeRow {
    id: String,
    symbol: String,
    trade_type: Option<String>,
    market_type: Option<String>,
    entry_price: Option<Decimal>,
    exit_price: Option<Decimal>,
    quantity: Decimal,
    profit_loss: Option<Decimal>,
    profit_loss_percentage: Option<Decimal>,
    entry_time: DateTime<Utc>,
    exit_time: Option<DateTime<Utc>>,
    status: String,
    strategy_id: Option<String>,
}

impl From<TradeRow> for Trade {
    fn from(row: TradeRow) -> Self {
        Trade {
            id: TradeId(row.id),
            symbol: Symbol(row.symbol),
            trade_type: row.trade_type,
            market_type: row.market_type,
            entry_price: row.entry_price,
            exit_price: row.exit_price,
            quantity: row.quantity,
            profit_loss: row.profit_loss,
            profit_loss_percentage: row.profit_loss_percentage,
            entry_time: row.entry_time,
            exit_time: row.exit_time,
            status: TradeStatus::from(row.status.as_str()),
            strategy_id: row.strategy_id,
        }
    }
}

const SELECT_TRADES: &str = r#"
    SELECT id::text AS id, symbol, trade_type, market_type,
           entry_price, exit_price, quantity,
           profit_loss, profit_loss_percentage,
           entry_time, exit_time, status,
           strategy_id::text AS strategy_id
    FROM trades
    WHERE ($1::text IS NULL OR user_id::text = $1)
    ORDER BY entry_time ASC
"#;

#[async_trait]
impl TradeSource for Db {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>> {
        let rows: Vec<TradeRow> = sqlx::query_as(SELECT_TRADES)
            .bind(self.user_id.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(Error::OperationFailed)?;

        tracing::debug!(count = rows.len(), "Fetched trades from postgres.");
        Ok(rows.into_iter().map(Trade::from).collect())
    }
}

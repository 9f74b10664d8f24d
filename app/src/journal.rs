// In app/src/journal.rs

use analytics::TradeFilter;
use anyhow::Result;
use core_types::Trade;
use database::TradeSource;

/// Fetches a snapshot from the trade source and narrows it for analysis.
///
/// With `derive_pnl`, closed trades that were saved without a P&L get one
/// computed from their prices before anything else sees them.
pub async fn load_trades(
    source: &dyn TradeSource,
    filter: &TradeFilter,
    derive_pnl: bool,
) -> Result<Vec<Trade>> {
    let trades = source.fetch_trades().await?;
    let fetched = trades.len();

    let trades: Vec<Trade> = if derive_pnl {
        trades.into_iter().map(Trade::with_resolved_profit_loss).collect()
    } else {
        trades
    };
    let trades = if filter.is_empty() { trades } else { filter.apply(&trades) };

    tracing::info!(
        source = source.name(),
        fetched,
        kept = trades.len(),
        "Loaded journal trades."
    );
    Ok(trades)
}

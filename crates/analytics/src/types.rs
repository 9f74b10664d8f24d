// In crates/analytics/src/types.rs

use chrono::{DateTime, NaiveDate, Utc};
use core_types::{MonthKey, Trade, TradeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline numbers for the dashboard and analytics cards.
///
/// Recomputed from scratch on every refresh; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceSummary {
    pub total_trades: usize,
    pub closed_trades: usize,
    pub open_trades: usize,
    pub cancelled_trades: usize,

    // Zero and missing P&L count toward neither.
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Full precision; rounding is left to whoever displays it.
    pub win_rate_percentage: f64,

    pub total_profit_loss: Decimal,
    pub average_profit_loss: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    /// Mean P&L of the winning trades, 0 without any.
    pub average_win: Decimal,
    /// Magnitude of the mean P&L of the losing trades, 0 without any.
    pub average_loss: Decimal,
}

impl PerformanceSummary {
    /// Creates a new, all-zero summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Best trade over the magnitude of the worst one. See [`crate::MetricsEngine::risk_ratio`].
    pub fn risk_ratio(&self) -> Option<f64> {
        crate::MetricsEngine::risk_ratio(self.best_trade, self.worst_trade)
    }
}

/// One step of the equity curve: a single closed trade and the running total through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// 1-based position among the closed trades.
    pub sequence_index: usize,
    pub point_in_time: DateTime<Utc>,
    pub period_profit_loss: Decimal,
    pub cumulative_profit_loss: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRatePoint {
    pub sequence_index: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRollup {
    pub month_key: MonthKey,
    pub trade_count: usize,
    pub winning_trade_count: usize,
    pub win_rate: f64,
    pub monthly_profit_loss: Decimal,
}

/// The categorical trade attributes a distribution can be taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionField {
    MarketType,
    TradeType,
}

impl DistributionField {
    /// Bucket name for trades with no usable value.
    pub const UNKNOWN_CATEGORY: &'static str = "unknown";

    /// The raw value of this field on a trade, if it carries a non-blank one.
    pub fn value_of<'a>(&self, trade: &'a Trade) -> Option<&'a str> {
        let raw = match self {
            DistributionField::MarketType => trade.market_type.as_deref(),
            DistributionField::TradeType => trade.trade_type.as_deref(),
        };
        raw.filter(|value| !value.trim().is_empty())
    }
}

impl fmt::Display for DistributionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionField::MarketType => f.write_str("market_type"),
            DistributionField::TradeType => f.write_str("trade_type"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBucket {
    pub category: String,
    pub count: usize,
}

/// One cell of the trading calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRollup {
    pub date: NaiveDate,
    pub profit_loss: Decimal,
    pub trade_count: usize,
    pub trade_ids: Vec<TradeId>,
}

impl DailyRollup {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            profit_loss: Decimal::ZERO,
            trade_count: 0,
            trade_ids: Vec::new(),
        }
    }
}

/// A month of the trading calendar plus the stat cards shown above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month_key: MonthKey,
    /// Only days with at least one trade, in date order.
    pub days: Vec<DailyRollup>,
    pub monthly_profit_loss: Decimal,
    /// Year to date, through the end of `month_key`.
    pub annual_profit_loss: Decimal,
    pub total_trades: usize,
}

/// A point of the dashboard's performance overview chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPerformancePoint {
    pub date: NaiveDate,
    pub profit_loss: Decimal,
    pub cumulative_profit_loss: Decimal,
    pub trade_count: usize,
}

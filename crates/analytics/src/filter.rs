// In crates/analytics/src/filter.rs

use chrono::NaiveDate;
use core_types::{Trade, TradeStatus};
use serde::{Deserialize, Serialize};

/// Narrows a journal down before it is analysed or exported.
///
/// Unset criteria match everything. Dates are compared against the UTC entry
/// date and both ends are inclusive. Categorical fields match exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub market_type: Option<String>,
    pub trade_type: Option<String>,
    pub status: Option<TradeStatus>,
    pub strategy_id: Option<String>,
}

impl TradeFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        let entry_date = trade.entry_time.date_naive();
        self.from.is_none_or(|from| entry_date >= from)
            && self.to.is_none_or(|to| entry_date <= to)
            && matches_text(&self.market_type, &trade.market_type)
            && matches_text(&self.trade_type, &trade.trade_type)
            && self.status.is_none_or(|status| trade.status == status)
            && matches_text(&self.strategy_id, &trade.strategy_id)
    }

    /// The matching trades, in their original order.
    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

fn matches_text(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual.as_deref() == Some(wanted.as_str()),
    }
}

// In crates/core-types/src/types.rs

use crate::error::{Error, Result};
use crate::pnl::{realized_profit_loss, realized_return_percentage};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a journal entry, as assigned by the trade store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub String);

impl From<&str> for TradeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instrument identifier, e.g. "AAPL" or "EURUSD".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle state of a trade.
///
/// The store keeps this as free text, so anything that is not one of the
/// three known states is kept as `Unknown` instead of failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TradeStatus {
    Open,
    Closed,
    Cancelled,
    Unknown,
}

impl From<&str> for TradeStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => TradeStatus::Open,
            "closed" => TradeStatus::Closed,
            "cancelled" | "canceled" => TradeStatus::Cancelled,
            _ => TradeStatus::Unknown,
        }
    }
}

impl From<String> for TradeStatus {
    fn from(value: String) -> Self {
        TradeStatus::from(value.as_str())
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
            TradeStatus::Cancelled => "cancelled",
            TradeStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Which way a position profits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Maps the journal's free-form trade type onto a direction.
    /// `buy`/`long` profit from a rise, `sell`/`short` from a fall.
    pub fn from_trade_type(trade_type: &str) -> Option<Self> {
        match trade_type.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" => Some(Direction::Long),
            "sell" | "short" => Some(Direction::Short),
            _ => None,
        }
    }
}

/// A single journal entry as handed over by the trade store.
///
/// The metrics code never mutates these; every optional field may be missing
/// on any record, including closed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub symbol: Symbol,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub market_type: Option<String>,
    #[serde(default)]
    pub entry_price: Option<Decimal>,
    #[serde(default)]
    pub exit_price: Option<Decimal>,
    pub quantity: Decimal,
    #[serde(default)]
    pub profit_loss: Option<Decimal>,
    #[serde(default)]
    pub profit_loss_percentage: Option<Decimal>,
    pub entry_time: DateTime<Utc>,
    #[serde(default)]
    pub exit_time: Option<DateTime<Utc>>,
    pub status: TradeStatus,
    #[serde(default)]
    pub strategy_id: Option<String>,
}

impl Trade {
    /// Creates an open trade with a quantity of one and every optional field unset.
    pub fn new(id: impl Into<TradeId>, symbol: impl Into<Symbol>, entry_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            trade_type: None,
            market_type: None,
            entry_price: None,
            exit_price: None,
            quantity: Decimal::ONE,
            profit_loss: None,
            profit_loss_percentage: None,
            entry_time,
            exit_time: None,
            status: TradeStatus::Open,
            strategy_id: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// The P&L used for sums: a missing value contributes nothing.
    pub fn profit_loss_or_zero(&self) -> Decimal {
        self.profit_loss.unwrap_or(Decimal::ZERO)
    }

    /// Strictly positive, known P&L.
    pub fn is_win(&self) -> bool {
        matches!(self.profit_loss, Some(pnl) if pnl > Decimal::ZERO)
    }

    /// Strictly negative, known P&L.
    pub fn is_loss(&self) -> bool {
        matches!(self.profit_loss, Some(pnl) if pnl < Decimal::ZERO)
    }

    /// Exit time when the trade has one, otherwise entry time.
    pub fn point_in_time(&self) -> DateTime<Utc> {
        self.exit_time.unwrap_or(self.entry_time)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.trade_type.as_deref().and_then(Direction::from_trade_type)
    }

    /// The stored P&L, or one derived from prices for a closed trade whose
    /// direction, entry and exit are all known.
    pub fn resolved_profit_loss(&self) -> Option<Decimal> {
        if self.profit_loss.is_some() {
            return self.profit_loss;
        }
        if !self.is_closed() {
            return None;
        }
        let direction = self.direction()?;
        Some(realized_profit_loss(
            direction,
            self.entry_price?,
            self.exit_price?,
            self.quantity,
        ))
    }

    /// Returns a copy with missing P&L fields filled in from prices where possible.
    pub fn with_resolved_profit_loss(mut self) -> Self {
        self.profit_loss = self.resolved_profit_loss();
        if self.profit_loss_percentage.is_none() && self.is_closed() {
            if let (Some(direction), Some(entry), Some(exit)) =
                (self.direction(), self.entry_price, self.exit_price)
            {
                self.profit_loss_percentage = realized_return_percentage(direction, entry, exit);
            }
        }
        self
    }
}

/// A calendar month, used to bucket trades for the monthly chart and the calendar.
///
/// Orders chronologically and renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The UTC month a timestamp falls in.
    pub fn of(timestamp: DateTime<Utc>) -> Self {
        Self::of_date(timestamp.date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of_date(date) == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap()
    }

    #[test]
    fn status_parses_free_text() {
        assert_eq!(TradeStatus::from("closed"), TradeStatus::Closed);
        assert_eq!(TradeStatus::from(" Open "), TradeStatus::Open);
        assert_eq!(TradeStatus::from("canceled"), TradeStatus::Cancelled);
        assert_eq!(TradeStatus::from("pending"), TradeStatus::Unknown);
    }

    #[test]
    fn trade_deserializes_with_missing_optionals() {
        let json = r#"{
            "id": "1",
            "symbol": "AAPL",
            "quantity": 50,
            "entry_time": "2024-01-15T10:30:00Z",
            "status": "Closed",
            "profit_loss": 275.00
        }"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.status, TradeStatus::Closed);
        assert_eq!(trade.profit_loss, Some(dec!(275)));
        assert_eq!(trade.market_type, None);
        assert_eq!(trade.exit_time, None);
    }

    #[test]
    fn unknown_status_survives_a_load() {
        let json = r#"{"id":"9","symbol":"X","quantity":1,"entry_time":"2024-01-01T00:00:00Z","status":"archived"}"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.status, TradeStatus::Unknown);
        assert!(!trade.is_closed());
    }

    #[test]
    fn zero_and_missing_pnl_are_neither_win_nor_loss() {
        let mut trade = Trade::new("1", "AAPL", at(2024, 1, 1));
        assert!(!trade.is_win() && !trade.is_loss());
        trade.profit_loss = Some(Decimal::ZERO);
        assert!(!trade.is_win() && !trade.is_loss());
        trade.profit_loss = Some(dec!(-0.01));
        assert!(trade.is_loss());
    }

    #[test]
    fn point_in_time_prefers_exit() {
        let mut trade = Trade::new("1", "AAPL", at(2024, 1, 1));
        assert_eq!(trade.point_in_time(), at(2024, 1, 1));
        trade.exit_time = Some(at(2024, 1, 3));
        assert_eq!(trade.point_in_time(), at(2024, 1, 3));
    }

    #[test]
    fn resolves_pnl_from_prices_for_closed_short() {
        let trade = Trade {
            trade_type: Some("short".into()),
            entry_price: Some(dec!(240.00)),
            exit_price: Some(dec!(235.50)),
            quantity: dec!(50),
            status: TradeStatus::Closed,
            ..Trade::new("2", "TSLA", at(2024, 1, 14))
        };
        let resolved = trade.with_resolved_profit_loss();
        assert_eq!(resolved.profit_loss, Some(dec!(225.00)));
        assert_eq!(resolved.profit_loss_percentage, Some(dec!(1.875)));
    }

    #[test]
    fn stored_pnl_wins_over_prices() {
        let trade = Trade {
            trade_type: Some("long".into()),
            entry_price: Some(dec!(10)),
            exit_price: Some(dec!(12)),
            profit_loss: Some(dec!(1.5)),
            status: TradeStatus::Closed,
            ..Trade::new("3", "MSFT", at(2024, 1, 12))
        };
        assert_eq!(trade.resolved_profit_loss(), Some(dec!(1.5)));
    }

    #[test]
    fn open_or_undirected_trades_do_not_resolve() {
        let open = Trade {
            trade_type: Some("long".into()),
            entry_price: Some(dec!(10)),
            exit_price: Some(dec!(12)),
            ..Trade::new("4", "MSFT", at(2024, 1, 12))
        };
        assert_eq!(open.resolved_profit_loss(), None);

        let undirected = Trade {
            trade_type: Some("spread".into()),
            status: TradeStatus::Closed,
            ..open
        };
        assert_eq!(undirected.resolved_profit_loss(), None);
    }

    #[test]
    fn month_key_orders_and_round_trips_as_text() {
        let dec23: MonthKey = "2023-12".parse().unwrap();
        let jan24 = MonthKey::of(at(2024, 1, 31));
        assert!(dec23 < jan24);
        assert_eq!(jan24.to_string(), "2024-01");
        assert_eq!(serde_json::to_string(&jan24).unwrap(), "\"2024-01\"");
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("January".parse::<MonthKey>().is_err());
    }

    #[test]
    fn month_key_contains_its_days_only() {
        let feb = MonthKey::new(2024, 2).unwrap();
        assert!(feb.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!feb.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }
}

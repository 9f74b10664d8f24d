// In crates/core-types/src/lib.rs

pub mod error;
pub mod pnl;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use pnl::{realized_profit_loss, realized_return_percentage};
pub use types::{Direction, MonthKey, Symbol, Trade, TradeId, TradeStatus};

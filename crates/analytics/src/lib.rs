// In crates/analytics/src/lib.rs

pub mod engine;
pub mod filter;
pub mod types;

pub use engine::{MetricsEngine, closed_chronological};
pub use filter::TradeFilter;
pub use types::{
    CalendarMonth, CumulativePoint, DailyPerformancePoint, DailyRollup, DistributionBucket,
    DistributionField, MonthlyRollup, PerformanceSummary, WinRatePoint,
};

// In crates/analytics/src/engine.rs

use crate::types::{
    CalendarMonth, CumulativePoint, DailyPerformancePoint, DailyRollup, DistributionBucket,
    DistributionField, MonthlyRollup, PerformanceSummary, WinRatePoint,
};
use chrono::NaiveDate;
use core_types::{MonthKey, Trade, TradeStatus};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::{BTreeMap, HashMap};

/// The engine responsible for turning a snapshot of journal trades into the
/// view models behind the dashboard, analytics page and calendar.
///
/// Every method borrows its input, returns freshly built output and keeps no
/// state between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsEngine;

impl MetricsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Calculates the headline statistics over an unordered list of trades.
    pub fn summary(&self, trades: &[Trade]) -> PerformanceSummary {
        let mut summary = PerformanceSummary::new();

        // 1. Counts by status
        summary.total_trades = trades.len();
        summary.open_trades = count_status(trades, TradeStatus::Open);
        summary.cancelled_trades = count_status(trades, TradeStatus::Cancelled);

        let closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();
        summary.closed_trades = closed.len();
        if closed.is_empty() {
            return summary;
        }

        // 2. Win/loss classification
        summary.winning_trades = closed.iter().filter(|t| t.is_win()).count();
        summary.losing_trades = closed.iter().filter(|t| t.is_loss()).count();
        summary.win_rate_percentage = percentage(summary.winning_trades, closed.len());

        // 3. P&L aggregates, missing values contributing zero
        summary.total_profit_loss = saturating_sum(closed.iter().map(|t| t.profit_loss_or_zero()));
        summary.average_profit_loss = mean(summary.total_profit_loss, closed.len());
        summary.best_trade = closed
            .iter()
            .map(|t| t.profit_loss_or_zero())
            .max()
            .unwrap_or(Decimal::ZERO);
        summary.worst_trade = closed
            .iter()
            .map(|t| t.profit_loss_or_zero())
            .min()
            .unwrap_or(Decimal::ZERO);

        // 4. Average winner and average loser, the loser as a magnitude
        let won = saturating_sum(closed.iter().filter(|t| t.is_win()).map(|t| t.profit_loss_or_zero()));
        let lost = saturating_sum(closed.iter().filter(|t| t.is_loss()).map(|t| t.profit_loss_or_zero()));
        summary.average_win = mean(won, summary.winning_trades);
        summary.average_loss = mean(lost, summary.losing_trades).abs();

        summary
    }

    /// Builds the equity curve, one point per trade.
    ///
    /// The caller must pass closed trades sorted ascending by entry time (see
    /// [`closed_chronological`]). The input is not re-sorted: out-of-order
    /// trades still produce a curve, just in the order given.
    pub fn cumulative_series<'a, I>(&self, closed_trades: I) -> Vec<CumulativePoint>
    where
        I: IntoIterator<Item = &'a Trade>,
    {
        let mut points = Vec::new();
        let mut running = Decimal::ZERO;
        let mut last_entry = None;
        let mut out_of_order = 0usize;

        for (index, trade) in closed_trades.into_iter().enumerate() {
            if last_entry.is_some_and(|last| trade.entry_time < last) {
                out_of_order += 1;
            }
            last_entry = Some(trade.entry_time);

            let period = trade.profit_loss_or_zero();
            running = running.saturating_add(period);
            points.push(CumulativePoint {
                sequence_index: index + 1,
                point_in_time: trade.point_in_time(),
                period_profit_loss: period,
                cumulative_profit_loss: running,
            });
        }

        if out_of_order > 0 {
            tracing::debug!(
                out_of_order,
                points = points.len(),
                "Cumulative series input is not sorted by entry time"
            );
        }

        points
    }

    /// Running win rate after each point of an equity curve.
    ///
    /// A single loss can pull the rate down, so the series is not monotonic.
    pub fn win_rate_series(&self, points: &[CumulativePoint]) -> Vec<WinRatePoint> {
        let mut wins = 0usize;
        points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                if point.period_profit_loss > Decimal::ZERO {
                    wins += 1;
                }
                let seen = index + 1;
                WinRatePoint {
                    sequence_index: seen,
                    win_rate: percentage(wins, seen),
                }
            })
            .collect()
    }

    /// Counts every trade, whatever its status, by the raw value of `field`.
    ///
    /// Buckets come out in order of first appearance. Missing or blank values
    /// land in [`DistributionField::UNKNOWN_CATEGORY`].
    pub fn distribution(&self, trades: &[Trade], field: DistributionField) -> Vec<DistributionBucket> {
        let mut buckets: Vec<DistributionBucket> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for trade in trades {
            let category = field
                .value_of(trade)
                .unwrap_or(DistributionField::UNKNOWN_CATEGORY);
            match positions.get(category) {
                Some(&position) => buckets[position].count += 1,
                None => {
                    positions.insert(category, buckets.len());
                    buckets.push(DistributionBucket {
                        category: category.to_string(),
                        count: 1,
                    });
                }
            }
        }

        buckets
    }

    /// Groups closed trades by the UTC month they were entered in, oldest month first.
    ///
    /// A trade that closes in a later month still belongs to its entry month.
    pub fn monthly_rollup(&self, trades: &[Trade]) -> Vec<MonthlyRollup> {
        let mut months: BTreeMap<MonthKey, (usize, usize, Decimal)> = BTreeMap::new();

        for trade in trades.iter().filter(|t| t.is_closed()) {
            let (count, wins, pnl) = months
                .entry(MonthKey::of(trade.entry_time))
                .or_insert((0, 0, Decimal::ZERO));
            *count += 1;
            if trade.is_win() {
                *wins += 1;
            }
            *pnl = pnl.saturating_add(trade.profit_loss_or_zero());
        }

        months
            .into_iter()
            .map(|(month_key, (trade_count, winning_trade_count, monthly_profit_loss))| MonthlyRollup {
                month_key,
                trade_count,
                winning_trade_count,
                win_rate: percentage(winning_trade_count, trade_count),
                monthly_profit_loss,
            })
            .collect()
    }

    /// Best trade over the magnitude of the worst trade.
    ///
    /// `None` when the worst trade is zero or the quotient does not fit in a
    /// `Decimal`; the UI shows either as "N/A". The sign of `best` is passed
    /// through untouched, so a journal with no winners yields a negative ratio.
    pub fn risk_ratio(best: Decimal, worst: Decimal) -> Option<f64> {
        if worst.is_zero() {
            return None;
        }
        best.checked_div(worst.abs()).and_then(|ratio| ratio.to_f64())
    }

    /// Day-by-day P&L for one calendar month.
    ///
    /// Every trade entered in the month counts, whatever its status.
    pub fn calendar_month(&self, trades: &[Trade], month: MonthKey) -> CalendarMonth {
        let mut days: BTreeMap<NaiveDate, DailyRollup> = BTreeMap::new();
        let mut annual_profit_loss = Decimal::ZERO;

        for trade in trades {
            let date = trade.entry_time.date_naive();
            let trade_month = MonthKey::of_date(date);
            if trade_month.year() == month.year() && trade_month <= month {
                annual_profit_loss = annual_profit_loss.saturating_add(trade.profit_loss_or_zero());
            }
            if !month.contains(date) {
                continue;
            }

            let day = days.entry(date).or_insert_with(|| DailyRollup::new(date));
            day.profit_loss = day.profit_loss.saturating_add(trade.profit_loss_or_zero());
            day.trade_count += 1;
            day.trade_ids.push(trade.id.clone());
        }

        let days: Vec<DailyRollup> = days.into_values().collect();
        CalendarMonth {
            month_key: month,
            monthly_profit_loss: saturating_sum(days.iter().map(|d| d.profit_loss)),
            total_trades: days.iter().map(|d| d.trade_count).sum(),
            annual_profit_loss,
            days,
        }
    }

    /// Closed-trade P&L per day, by exit date (entry date when there is no
    /// exit), with the running total across days.
    pub fn daily_performance(&self, trades: &[Trade]) -> Vec<DailyPerformancePoint> {
        let mut days: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();
        for trade in trades.iter().filter(|t| t.is_closed()) {
            let (pnl, count) = days
                .entry(trade.point_in_time().date_naive())
                .or_insert((Decimal::ZERO, 0));
            *pnl = pnl.saturating_add(trade.profit_loss_or_zero());
            *count += 1;
        }

        let mut running = Decimal::ZERO;
        days.into_iter()
            .map(|(date, (profit_loss, trade_count))| {
                running = running.saturating_add(profit_loss);
                DailyPerformancePoint {
                    date,
                    profit_loss,
                    cumulative_profit_loss: running,
                    trade_count,
                }
            })
            .collect()
    }
}

/// Closed trades in ascending entry-time order, ready for
/// [`MetricsEngine::cumulative_series`]. Ties keep their input order.
pub fn closed_chronological(trades: &[Trade]) -> Vec<&Trade> {
    let mut closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();
    closed.sort_by_key(|t| t.entry_time);
    closed
}

fn count_status(trades: &[Trade], status: TradeStatus) -> usize {
    trades.iter().filter(|t| t.status == status).count()
}

/// Money totals pin at `Decimal::MAX`/`MIN` instead of overflowing.
fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `total / count`, or 0 when there is nothing to average.
fn mean(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    total.checked_div(Decimal::from(count)).unwrap_or(Decimal::ZERO)
}

/// `part / whole * 100`, or 0 for an empty whole.
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64) * 100.0
}

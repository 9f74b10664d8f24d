// In app/src/report.rs

use analytics::{
    CalendarMonth, CumulativePoint, DailyPerformancePoint, DistributionBucket, DistributionField,
    MonthlyRollup, PerformanceSummary, WinRatePoint,
};
use serde::Serialize;

/// Prints any view model as pretty JSON, for piping into other tools.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_summary(summary: &PerformanceSummary) {
    println!("\n--- Performance Summary ---");
    println!(
        "  Trades:        {} ({} closed, {} open, {} cancelled)",
        summary.total_trades, summary.closed_trades, summary.open_trades, summary.cancelled_trades
    );
    println!(
        "  Win Rate:      {:.1}% ({}W / {}L)",
        summary.win_rate_percentage, summary.winning_trades, summary.losing_trades
    );
    println!("  Total P&L:     ${:.2}", summary.total_profit_loss);
    println!("  Avg per Trade: ${:.2}", summary.average_profit_loss);
    println!("  Best Trade:    ${:.2}", summary.best_trade);
    println!("  Worst Trade:   ${:.2}", summary.worst_trade.abs());
    println!("  Avg Win:       ${:.2}", summary.average_win);
    println!("  Avg Loss:      ${:.2}", summary.average_loss);
    match summary.risk_ratio() {
        Some(ratio) => println!("  Risk/Reward:   {ratio:.2}"),
        None => println!("  Risk/Reward:   N/A"),
    }
}

pub fn print_equity(points: &[CumulativePoint]) {
    if points.is_empty() {
        println!("No closed trades to display");
        return;
    }
    println!("\n{:>5}  {:<10}  {:>12}  {:>12}", "#", "Date", "P&L", "Cumulative");
    for point in points {
        println!(
            "{:>5}  {:<10}  {:>12.2}  {:>12.2}",
            point.sequence_index,
            point.point_in_time.format("%Y-%m-%d").to_string(),
            point.period_profit_loss,
            point.cumulative_profit_loss
        );
    }
}

pub fn print_win_rate(points: &[WinRatePoint]) {
    if points.is_empty() {
        println!("No closed trades to display");
        return;
    }
    println!("\n{:>5}  {:>8}", "Trade", "Win Rate");
    for point in points {
        println!("{:>5}  {:>7.1}%", point.sequence_index, point.win_rate);
    }
}

pub fn print_distribution(field: DistributionField, buckets: &[DistributionBucket]) {
    let total: usize = buckets.iter().map(|b| b.count).sum();
    println!("\n--- Distribution by {field} ---");
    for bucket in buckets {
        let share = if total > 0 {
            bucket.count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        println!("  {:<14} {:>5}  ({share:.1}%)", bucket.category, bucket.count);
    }
}

pub fn print_monthly(rollup: &[MonthlyRollup]) {
    if rollup.is_empty() {
        println!("No closed trades to display");
        return;
    }
    println!("\n{:<8}  {:>6}  {:>5}  {:>8}  {:>12}", "Month", "Trades", "Wins", "Win Rate", "P&L");
    for month in rollup {
        println!(
            "{:<8}  {:>6}  {:>5}  {:>7.1}%  {:>12.2}",
            month.month_key.to_string(),
            month.trade_count,
            month.winning_trade_count,
            month.win_rate,
            month.monthly_profit_loss
        );
    }
}

pub fn print_calendar(calendar: &CalendarMonth) {
    println!("\n--- Trading Calendar {} ---", calendar.month_key);
    println!("  Monthly Net Profit: ${:.2}", calendar.monthly_profit_loss);
    println!("  Annual Net Profit:  ${:.2}", calendar.annual_profit_loss);
    println!("  Total Trades:       {}", calendar.total_trades);
    for day in &calendar.days {
        let trades = if day.trade_count == 1 {
            "1 trade".to_string()
        } else {
            format!("{} trades", day.trade_count)
        };
        println!("  {}  {:>12.2}  {trades}", day.date, day.profit_loss);
    }
}

pub fn print_daily(points: &[DailyPerformancePoint]) {
    if points.is_empty() {
        println!("No closed trades to display");
        return;
    }
    println!("\n{:<10}  {:>6}  {:>12}  {:>12}", "Date", "Trades", "P&L", "Cumulative");
    for point in points {
        println!(
            "{:<10}  {:>6}  {:>12.2}  {:>12.2}",
            point.date.to_string(),
            point.trade_count,
            point.profit_loss,
            point.cumulative_profit_loss
        );
    }
}

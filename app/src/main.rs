// In app/src/main.rs

use analytics::{DistributionField, MetricsEngine, TradeFilter};
use anyhow::Result;
use app_config::{Settings, SourceKind};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use core_types::{MonthKey, Trade, TradeStatus};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;

mod journal;
mod report;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Performance metrics for a trading journal.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the result as JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    /// Overrides the configured trade source.
    #[arg(long, global = true, value_enum)]
    source: Option<SourceArg>,

    /// Reads trades from this JSON file (implies `--source json`).
    #[arg(long, global = true)]
    file: Option<String>,

    /// Only trades entered on or after this date (YYYY-MM-DD).
    #[arg(long, global = true, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Only trades entered on or before this date (YYYY-MM-DD).
    #[arg(long, global = true, value_parser = parse_date)]
    to: Option<NaiveDate>,

    /// Only trades in this market (e.g. "stock", "crypto").
    #[arg(long, global = true)]
    market_type: Option<String>,

    /// Only trades of this type (e.g. "long", "short").
    #[arg(long, global = true)]
    trade_type: Option<String>,

    /// Only trades with this status.
    #[arg(long, global = true, value_enum)]
    status: Option<StatusArg>,

    /// Only trades tagged with this strategy id.
    #[arg(long, global = true)]
    strategy: Option<String>,

    /// Fill in missing P&L on closed trades from their prices.
    #[arg(long, global = true)]
    derive_pnl: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Headline statistics for the whole journal.
    Summary,

    /// Cumulative P&L after each closed trade.
    Equity,

    /// Running win rate after each closed trade.
    WinRate,

    /// Trade counts per category.
    Distribution {
        #[arg(short, long, value_enum, default_value_t = FieldArg::MarketType)]
        field: FieldArg,
    },

    /// P&L and win rate per calendar month.
    Monthly,

    /// Day-by-day P&L for one month.
    Calendar {
        /// The month to show in YYYY-MM format. Defaults to the current month.
        #[arg(short, long)]
        month: Option<MonthKey>,
    },

    /// P&L per trading day with a running total.
    Daily,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SourceArg {
    Json,
    Postgres,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Json => SourceKind::Json,
            SourceArg::Postgres => SourceKind::Postgres,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Open,
    Closed,
    Cancelled,
}

impl From<StatusArg> for TradeStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => TradeStatus::Open,
            StatusArg::Closed => TradeStatus::Closed,
            StatusArg::Cancelled => TradeStatus::Cancelled,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FieldArg {
    MarketType,
    TradeType,
}

impl From<FieldArg> for DistributionField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::MarketType => DistributionField::MarketType,
            FieldArg::TradeType => DistributionField::TradeType,
        }
    }
}

fn parse_date(value: &str) -> core_types::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| core_types::Error::InvalidDate(value.to_string()))
}

impl Cli {
    fn filter(&self) -> TradeFilter {
        TradeFilter {
            from: self.from,
            to: self.to,
            market_type: self.market_type.clone(),
            trade_type: self.trade_type.clone(),
            status: self.status.map(TradeStatus::from),
            strategy_id: self.strategy.clone(),
        }
    }

    /// Applies the source flags on top of the loaded settings.
    fn apply_overrides(&self, settings: &mut Settings) -> Result<()> {
        if let Some(source) = self.source {
            settings.source.kind = source.into();
        }
        if let Some(file) = &self.file {
            settings.source.kind = SourceKind::Json;
            settings.source.path = Some(file.clone());
        }
        settings.validate()?;
        Ok(())
    }
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = app_config::load_settings()?;
    cli.apply_overrides(&mut settings)?;

    // Logs go to stderr so that `--json` output stays machine-readable.
    let default_level: LevelFilter = settings.app.log_level.parse()?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("sqlx::query", tracing::Level::WARN)
                .with_default(default_level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!(environment = %settings.app.environment, "Starting journal metrics");

    let source = database::open_source(&settings.source).await?;
    let trades = journal::load_trades(source.as_ref(), &cli.filter(), cli.derive_pnl).await?;

    run_command(&cli, &trades)?;

    tracing::info!("Journal metrics finished successfully.");
    Ok(())
}

/// Runs the selected engine operation over the snapshot and prints the result.
fn run_command(cli: &Cli, trades: &[Trade]) -> Result<()> {
    let engine = MetricsEngine::new();

    match &cli.command {
        Commands::Summary => {
            let summary = engine.summary(trades);
            if cli.json {
                report::print_json(&summary)?;
            } else {
                report::print_summary(&summary);
            }
        }
        Commands::Equity => {
            let closed = analytics::closed_chronological(trades);
            let points = engine.cumulative_series(closed);
            if cli.json {
                report::print_json(&points)?;
            } else {
                report::print_equity(&points);
            }
        }
        Commands::WinRate => {
            let closed = analytics::closed_chronological(trades);
            let points = engine.cumulative_series(closed);
            let win_rates = engine.win_rate_series(&points);
            if cli.json {
                report::print_json(&win_rates)?;
            } else {
                report::print_win_rate(&win_rates);
            }
        }
        Commands::Distribution { field } => {
            let field = DistributionField::from(*field);
            let buckets = engine.distribution(trades, field);
            if cli.json {
                report::print_json(&buckets)?;
            } else {
                report::print_distribution(field, &buckets);
            }
        }
        Commands::Monthly => {
            let rollup = engine.monthly_rollup(trades);
            if cli.json {
                report::print_json(&rollup)?;
            } else {
                report::print_monthly(&rollup);
            }
        }
        Commands::Calendar { month } => {
            let month = month.unwrap_or_else(|| MonthKey::of(Utc::now()));
            let calendar = engine.calendar_month(trades, month);
            if cli.json {
                report::print_json(&calendar)?;
            } else {
                report::print_calendar(&calendar);
            }
        }
        Commands::Daily => {
            let points = engine.daily_performance(trades);
            if cli.json {
                report::print_json(&points)?;
            } else {
                report::print_daily(&points);
            }
        }
    }

    Ok(())
}

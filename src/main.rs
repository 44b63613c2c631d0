//! wtd-atr: fetch daily history for one symbol and print its ATR table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use wtd_atr::market::query::{DEFAULT_PREVIOUS_DAYS, DEFAULT_SYMBOL, MAX_PREVIOUS_DAYS, format_date};
use wtd_atr::{
    Config, DEFAULT_ATR_PERIOD, DerivedRow, HistoryQuery, SortOrder, SystemClock,
    WorldTradingDataClient, fetch_atr_table, logging,
};

#[derive(Parser)]
#[command(name = "wtd-atr", version, about = "Average True Range from World Trading Data daily history")]
struct Cli {
    /// Symbol to fetch
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// First day of history (YYYY-MM-DD); overrides --previous-days
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Last day of history (YYYY-MM-DD); defaults to today
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Calendar days of history before the end date
    #[arg(
        long,
        default_value_t = DEFAULT_PREVIOUS_DAYS,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_PREVIOUS_DAYS))
    )]
    previous_days: u32,

    /// Sort order requested from the provider (oldest or newest)
    #[arg(long, default_value_t = SortOrder::Oldest)]
    sort: SortOrder,

    /// ATR window length
    #[arg(long, default_value_t = DEFAULT_ATR_PERIOD)]
    window: usize,

    /// Print rows as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    fn query(&self) -> HistoryQuery {
        let mut query = HistoryQuery::new(&self.symbol)
            .with_previous_days(self.previous_days)
            .with_sort(self.sort);
        if let Some(start) = self.start_date {
            query = query.with_start_date(start);
        }
        if let Some(end) = self.end_date {
            query = query.with_end_date(end);
        }
        query
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let client = WorldTradingDataClient::new(Config::from_env());

    let rows = fetch_atr_table(&client, &SystemClock, &cli.query(), Some(cli.window))
        .await
        .with_context(|| format!("failed to build ATR table for {}", cli.symbol))?;

    info!(symbol = %cli.symbol, rows = rows.len(), "ATR table ready");

    if cli.json {
        let out = serde_json::to_string_pretty(&rows).context("failed to serialize rows")?;
        println!("{}", out);
    } else {
        print_table(&rows);
    }

    Ok(())
}

fn print_table(rows: &[DerivedRow]) {
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>12} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "date", "open", "high", "low", "close", "volume", "TH-TL", "TH-YC", "TL-YC", "True Range", "ATR"
    );

    for row in rows {
        let c = &row.candle;
        println!(
            "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12} {:>10.2} {:>10} {:>10} {:>10} {:>10}",
            format_date(c.get_date()),
            c.get_open(),
            c.get_high(),
            c.get_low(),
            c.get_close(),
            c.get_volume(),
            row.th_tl,
            cell(row.th_yc),
            cell(row.tl_yc),
            cell(row.true_range),
            cell(row.atr),
        );
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{:.2}", v))
}

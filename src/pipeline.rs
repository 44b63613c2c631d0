//! End-to-end ATR pipeline: query -> fetch -> load -> calculate.

use tracing::{debug, info};

use crate::error::Result;
use crate::indicators::volatility::{DerivedRow, atr_series};
use crate::market::clock::Clock;
use crate::market::history::TimeSeries;
use crate::market::history_fetcher::HistoryFetcher;
use crate::market::query::HistoryQuery;

/// Fetches history for `query` and returns the derived ATR table, oldest first.
///
/// Runs sequentially and keeps no state between calls. Malformed payloads fail
/// the whole call; retrying is left to the caller.
pub async fn fetch_atr_table<F, C>(
    fetcher: &F,
    clock: &C,
    query: &HistoryQuery,
    period: Option<usize>,
) -> Result<Vec<DerivedRow>>
where
    F: HistoryFetcher,
    C: Clock,
{
    let params = query.to_params(clock, fetcher.api_token());
    info!(
        provider = fetcher.name(),
        symbol = %params.symbol,
        date_from = %params.date_from,
        date_to = %params.date_to,
        "Fetching history"
    );

    let raw = fetcher.fetch_history(&params).await?;
    let series = TimeSeries::from_json(&raw)?;
    debug!(records = series.len(), first = ?series.first_date(), last = ?series.last_date(), "History loaded");

    Ok(atr_series(series.candles(), period))
}

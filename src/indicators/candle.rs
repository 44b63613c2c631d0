//! Candle (daily OHLCV) data structure keyed by calendar date

use chrono::NaiveDate;
use serde::Serialize;

/// Represents one trading day of OHLCV data.
///
/// Daily history from the provider is keyed by calendar date rather than a
/// millisecond timestamp, so the candle carries a `NaiveDate`.
/// Candles are immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl Candle {
    /// Creates a new Candle for the given trading day.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the trading day this candle covers.
    pub fn get_date(&self) -> NaiveDate {
        self.date
    }

    pub fn get_open(&self) -> f64 {
        self.open
    }

    pub fn get_high(&self) -> f64 {
        self.high
    }

    pub fn get_low(&self) -> f64 {
        self.low
    }

    pub fn get_close(&self) -> f64 {
        self.close
    }

    pub fn get_volume(&self) -> u64 {
        self.volume
    }

    /// Returns the full range of the candle (high - low).
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

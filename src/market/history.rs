//! Daily price history payloads and the ordered time series built from them.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AtrError, Result};
use crate::indicators::candle::Candle;
use crate::market::query::DATE_FORMAT;

// Wire format of the history endpoint. Every numeric field may arrive as a
// JSON string ("7059.40") or a plain number depending on the provider.
//
// {
//     "name": "UKX",
//     "history": {
//         "2018-10-16": {"open": "7029.22", "close": "7059.40", "high": "7062.08", "low": "6998.93", "volume": "0"}
//     }
// }

#[derive(Debug, Deserialize)]
struct HistoryPayload {
    history: HashMap<String, WireRecord>,
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    open: WireValue,
    high: WireValue,
    low: WireValue,
    close: WireValue,
    volume: WireValue,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Number(serde_json::Number),
    Text(String),
}

impl WireValue {
    fn to_price(&self, date: &str, field: &str) -> Result<f64> {
        let value = match self {
            WireValue::Number(n) => n.as_f64(),
            WireValue::Text(s) => s.trim().parse::<f64>().ok(),
        };

        value
            .filter(|v| v.is_finite())
            .ok_or_else(|| AtrError::malformed(format!("{date}: invalid {field} value {self}")))
    }

    /// Accepts non-negative integers, including whole floats such as `1e3` or `"1000.0"`.
    fn to_volume(&self, date: &str) -> Result<u64> {
        let value = match self {
            WireValue::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_volume)),
            WireValue::Text(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_volume))
            }
        };

        value.ok_or_else(|| AtrError::malformed(format!("{date}: invalid volume value {self}")))
    }
}

fn whole_volume(v: f64) -> Option<u64> {
    (v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64).then_some(v as u64)
}

impl std::fmt::Display for WireValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireValue::Number(n) => write!(f, "{}", n),
            WireValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Daily candles ordered oldest first, one per calendar date.
///
/// Gaps (weekends, holidays) are kept as-is; dates are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    candles: Vec<Candle>,
}

impl TimeSeries {
    /// Parses a raw history response into an ordered series.
    ///
    /// Provider key order is not trusted: records are always re-sorted by date.
    /// An empty `history` object yields an empty series.
    pub fn from_json(raw: &str) -> Result<Self> {
        let payload: HistoryPayload =
            serde_json::from_str(raw).map_err(|e| AtrError::malformed(e.to_string()))?;

        let candles = payload
            .history
            .iter()
            .map(|(date, record)| parse_record(date, record))
            .collect::<Result<Vec<_>>>()?;

        Self::from_candles(candles)
    }

    /// Builds a series from candles in any order.
    ///
    /// Fails if two candles share the same date.
    pub fn from_candles(mut candles: Vec<Candle>) -> Result<Self> {
        candles.sort_by_key(Candle::get_date);

        if let Some(pair) = candles.windows(2).find(|pair| pair[0].get_date() == pair[1].get_date()) {
            return Err(AtrError::malformed(format!(
                "duplicate history date {}",
                pair[0].get_date().format(DATE_FORMAT)
            )));
        }

        Ok(Self { candles })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.candles.first().map(Candle::get_date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.candles.last().map(Candle::get_date)
    }
}

fn parse_record(date: &str, record: &WireRecord) -> Result<Candle> {
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| AtrError::malformed(format!("invalid history date {date:?}: {e}")))?;

    Ok(Candle::new(
        day,
        record.open.to_price(date, "open")?,
        record.high.to_price(date, "high")?,
        record.low.to_price(date, "low")?,
        record.close.to_price(date, "close")?,
        record.volume.to_volume(date)?,
    ))
}

//! Volatility indicators: True Range (TR) and Average True Range (ATR)

use serde::Serialize;

use crate::indicators::candle::Candle;
use crate::indicators::ring_buffer::RingBuffer;

pub const DEFAULT_ATR_PERIOD: usize = 14;

/// A candle extended with its derived volatility columns.
///
/// Columns that need a previous row (or a full window) are `None` until
/// enough history exists. Missing values are never coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedRow {
    #[serde(flatten)]
    pub candle: Candle,
    /// Today's high minus today's low.
    #[serde(rename = "TH-TL")]
    pub th_tl: f64,
    /// |today's high - yesterday's low|.
    ///
    /// The label says "yesterday's close" but the value has always been taken
    /// against the previous row's low. Downstream consumers depend on the
    /// value, so it is kept as is. It does not feed into `true_range`.
    #[serde(rename = "TH-YC")]
    pub th_yc: Option<f64>,
    /// |today's low - yesterday's close|.
    #[serde(rename = "TL-YC")]
    pub tl_yc: Option<f64>,
    /// Max of the defined values among `th_tl` and `tl_yc`.
    #[serde(rename = "True Range")]
    pub true_range: Option<f64>,
    /// Simple moving average of `true_range` over the ATR period.
    #[serde(rename = "ATR")]
    pub atr: Option<f64>,
}

impl DerivedRow {
    pub fn get_date(&self) -> chrono::NaiveDate {
        self.candle.get_date()
    }
}

/// Calculates the True Range for a single candle.
///
/// Only today's range and |low - previous close| participate. Without a
/// previous candle the range alone is returned.
pub fn true_range(candle: &Candle, prev: Option<&Candle>) -> Option<f64> {
    let tl_yc = prev.map(|p| (candle.get_low() - p.get_close()).abs());
    max_defined(Some(candle.range()), tl_yc)
}

/// Row-wise max that skips missing operands; `None` only if both are missing.
fn max_defined(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Lazily derives one [`DerivedRow`] per candle, oldest first.
///
/// Keeps only the previous candle and the last `period` True Range values,
/// so each row costs O(period) regardless of series length.
#[derive(Debug, Clone)]
pub struct AtrRows<'a> {
    candles: std::slice::Iter<'a, Candle>,
    previous: Option<&'a Candle>,
    // None when the period is zero: no ATR is ever defined.
    window: Option<RingBuffer<Option<f64>>>,
    period: usize,
}

impl<'a> AtrRows<'a> {
    fn new(candles: &'a [Candle], period: usize) -> Self {
        Self {
            candles: candles.iter(),
            previous: None,
            window: (period > 0).then(|| RingBuffer::new(period)),
            period,
        }
    }

    fn rolling_mean(&self) -> Option<f64> {
        let window = self.window.as_ref()?;
        if !window.is_full() {
            return None;
        }

        // Summed oldest to newest; any missing value leaves the mean undefined.
        let total: Option<f64> = window.iter().copied().sum();
        total.map(|sum| sum / self.period as f64)
    }
}

impl Iterator for AtrRows<'_> {
    type Item = DerivedRow;

    fn next(&mut self) -> Option<DerivedRow> {
        let candle = self.candles.next()?;
        let prev = self.previous;

        let th_tl = candle.range();
        let th_yc = prev.map(|p| (candle.get_high() - p.get_low()).abs());
        let tl_yc = prev.map(|p| (candle.get_low() - p.get_close()).abs());
        let true_range = true_range(candle, prev);

        if let Some(window) = self.window.as_mut() {
            window.push(true_range);
        }
        let atr = self.rolling_mean();

        self.previous = Some(candle);

        Some(DerivedRow {
            candle: *candle,
            th_tl,
            th_yc,
            tl_yc,
            true_range,
            atr,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.candles.size_hint()
    }
}

impl ExactSizeIterator for AtrRows<'_> {}

/// Returns a lazy iterator of derived rows for candles sorted oldest first.
///
/// Pass `None` to use the default period of 14, or `Some(n)` for a custom period.
pub fn atr_rows(candles: &[Candle], period: Option<usize>) -> AtrRows<'_> {
    AtrRows::new(candles, period.unwrap_or(DEFAULT_ATR_PERIOD))
}

/// Calculates the full derived table, one row per candle, in input order.
///
/// An empty slice yields an empty table. Fewer than `period` candles yields
/// rows with no ATR values.
pub fn atr_series(candles: &[Candle], period: Option<usize>) -> Vec<DerivedRow> {
    atr_rows(candles, period).collect()
}

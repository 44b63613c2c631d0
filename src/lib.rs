//! Daily OHLC history fetching and Average True Range (ATR) derivation.

pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod market;
pub mod pipeline;

pub use config::Config;
pub use error::{AtrError, Result};
pub use indicators::candle::Candle;
pub use indicators::volatility::{AtrRows, DEFAULT_ATR_PERIOD, DerivedRow, atr_rows, atr_series};
pub use market::{
    Clock, FixedClock, HistoryFetcher, HistoryQuery, QueryParams, SortOrder, SystemClock,
    TimeSeries, WorldTradingDataClient,
};
pub use pipeline::fetch_atr_table;

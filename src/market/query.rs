//! History query description and the request parameters derived from it.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::market::clock::Clock;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_SYMBOL: &str = "UKX";
pub const DEFAULT_PREVIOUS_DAYS: u32 = 300;
/// Largest lookback accepted from the command line (100 years).
pub const MAX_PREVIOUS_DAYS: u32 = 36_500;

/// Order in which the provider is asked to return history.
///
/// The loader re-sorts regardless; this only shapes the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Oldest,
    Newest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Oldest => "oldest",
            SortOrder::Newest => "newest",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oldest" => Ok(SortOrder::Oldest),
            "newest" => Ok(SortOrder::Newest),
            other => Err(format!("unknown sort order {:?} (expected oldest or newest)", other)),
        }
    }
}

/// What history to fetch for one symbol.
///
/// Defaults: symbol `UKX`, ending today, 300 calendar days back, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub symbol: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub previous_days: u32,
    pub sort: SortOrder,
}

impl HistoryQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            start_date: None,
            end_date: None,
            previous_days: DEFAULT_PREVIOUS_DAYS,
            sort: SortOrder::default(),
        }
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Ignored when an explicit start date is set.
    pub fn with_previous_days(mut self, previous_days: u32) -> Self {
        self.previous_days = previous_days;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Resolves the concrete date range.
    ///
    /// A missing end date is today; a missing start date is the end date minus
    /// `previous_days` calendar days, saturating at `NaiveDate::MIN` when the
    /// lookback runs past the supported calendar.
    pub fn date_range(&self, clock: &impl Clock) -> (NaiveDate, NaiveDate) {
        let end_date = self.end_date.unwrap_or_else(|| clock.today());
        let start_date = self.start_date.unwrap_or_else(|| {
            end_date
                .checked_sub_days(Days::new(u64::from(self.previous_days)))
                .unwrap_or(NaiveDate::MIN)
        });
        (start_date, end_date)
    }

    /// Builds the request parameters. The token is passed through unchecked;
    /// the fetcher rejects a missing one.
    pub fn to_params(&self, clock: &impl Clock, api_token: Option<&str>) -> QueryParams {
        let (start_date, end_date) = self.date_range(clock);

        QueryParams {
            symbol: self.symbol.clone(),
            sort: self.sort,
            date_from: format_date(start_date),
            date_to: format_date(end_date),
            api_token: api_token.map(str::to_string),
        }
    }
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL)
    }
}

/// Query string parameters for the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParams {
    pub symbol: String,
    pub sort: SortOrder,
    pub date_from: String,
    pub date_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::clock::FixedClock;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(day(2018, 10, 16))
    }

    #[test]
    fn test_defaults() {
        let params = HistoryQuery::default().to_params(&clock(), Some("token"));
        assert_eq!(params.symbol, "UKX");
        assert_eq!(params.sort, SortOrder::Oldest);
        assert_eq!(params.date_to, "2018-10-16");
        // 300 calendar days before 2018-10-16
        assert_eq!(params.date_from, "2017-12-20");
        assert_eq!(params.api_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_previous_days_from_explicit_end() {
        let params = HistoryQuery::new("AAPL")
            .with_end_date(day(2018, 3, 1))
            .with_previous_days(1)
            .to_params(&clock(), None);
        assert_eq!(params.date_from, "2018-02-28");
        assert_eq!(params.date_to, "2018-03-01");
    }

    #[test]
    fn test_explicit_start_ignores_previous_days() {
        let query = HistoryQuery::new("UKX")
            .with_start_date(day(2018, 1, 2))
            .with_previous_days(5);
        let (start, end) = query.date_range(&clock());
        assert_eq!(start, day(2018, 1, 2));
        assert_eq!(end, day(2018, 10, 16));
    }

    #[test]
    fn test_lookback_saturates_at_min_date() {
        let query = HistoryQuery::new("UKX").with_previous_days(u32::MAX);
        let (start, end) = query.date_range(&clock());
        assert_eq!(start, NaiveDate::MIN);
        assert_eq!(end, day(2018, 10, 16));
    }

    #[test]
    fn test_max_lookback_stays_in_range() {
        let query = HistoryQuery::new("UKX").with_previous_days(MAX_PREVIOUS_DAYS);
        let (start, _) = query.date_range(&clock());
        assert!(start > NaiveDate::MIN);
        assert_eq!(start.format(DATE_FORMAT).to_string().len(), 10);
    }

    #[test]
    fn test_dates_zero_padded() {
        let params = HistoryQuery::new("UKX")
            .with_start_date(day(2018, 1, 5))
            .with_end_date(day(2018, 2, 9))
            .to_params(&clock(), None);
        assert_eq!(params.date_from, "2018-01-05");
        assert_eq!(params.date_to, "2018-02-09");
    }

    #[test]
    fn test_params_serialize_for_query_string() {
        let params = HistoryQuery::default()
            .with_sort(SortOrder::Newest)
            .to_params(&clock(), Some("abc"));
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["sort"], "newest");
        assert_eq!(value["api_token"], "abc");

        let without_token = HistoryQuery::default().to_params(&clock(), None);
        let value = serde_json::to_value(&without_token).unwrap();
        assert!(value.get("api_token").is_none());
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("oldest".parse::<SortOrder>(), Ok(SortOrder::Oldest));
        assert_eq!("NEWEST".parse::<SortOrder>(), Ok(SortOrder::Newest));
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}

//! Market data module: history queries, fetching and loading.

pub mod clock;
pub mod history;
pub mod history_fetcher;
pub mod providers;
pub mod query;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use history::TimeSeries;
pub use history_fetcher::HistoryFetcher;
pub use providers::WorldTradingDataClient;
pub use query::{HistoryQuery, QueryParams, SortOrder};

//! HistoryFetcher trait for provider-specific history retrieval.

use std::future::Future;

use crate::error::Result;
use crate::market::query::QueryParams;

// The pipeline only needs raw history text for a set of query params.
// Each data provider implements this trait; parsing and indicator math
// stay provider-agnostic.

pub trait HistoryFetcher {
    fn name(&self) -> &'static str;

    /// Token configured at construction, if any. Copied into the query params.
    fn api_token(&self) -> Option<&str>;

    /// Fetches the raw history payload as UTF-8 text.
    /// Fails with `MissingCredential` if `params.api_token` is absent.
    fn fetch_history(&self, params: &QueryParams) -> impl Future<Output = Result<String>> + Send;
}

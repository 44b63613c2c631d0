//! World Trading Data history provider.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AtrError, Result};
use crate::market::history_fetcher::HistoryFetcher;
use crate::market::query::QueryParams;

/// HTTP client for the World Trading Data `history` endpoint.
///
/// Plain GET with the query params in the query string; no retries.
#[derive(Debug, Clone)]
pub struct WorldTradingDataClient {
    http: reqwest::Client,
    config: Config,
}

impl WorldTradingDataClient {
    pub fn new(config: Config) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Reuses an existing reqwest client (timeouts, proxies, pooling).
    pub fn with_http_client(http: reqwest::Client, config: Config) -> Self {
        Self { http, config }
    }
}

impl HistoryFetcher for WorldTradingDataClient {
    fn name(&self) -> &'static str {
        "WorldTradingData"
    }

    fn api_token(&self) -> Option<&str> {
        self.config.api_token.as_deref()
    }

    async fn fetch_history(&self, params: &QueryParams) -> Result<String> {
        if params.api_token.is_none() {
            warn!(provider = self.name(), symbol = %params.symbol, "No API token configured");
            return Err(AtrError::MissingCredential);
        }

        let url = self.config.history_url();
        debug!(
            provider = self.name(),
            %url,
            symbol = %params.symbol,
            date_from = %params.date_from,
            date_to = %params.date_to,
            sort = %params.sort,
            "Requesting history"
        );

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(provider = self.name(), %status, "History request rejected");
            return Err(AtrError::Status { status, body });
        }

        info!(provider = self.name(), symbol = %params.symbol, bytes = body.len(), "History received");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::clock::FixedClock;
    use crate::market::query::HistoryQuery;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2018, 10, 16).unwrap())
    }

    #[test]
    fn test_api_token_from_config() {
        let client = WorldTradingDataClient::new(Config::new(Some("secret".into()), "http://localhost"));
        assert_eq!(client.api_token(), Some("secret"));
        assert_eq!(client.name(), "WorldTradingData");

        let anonymous = WorldTradingDataClient::new(Config::default());
        assert_eq!(anonymous.api_token(), None);
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_request() {
        // Unroutable base URL: reaching the network would produce an Http error instead.
        let client = WorldTradingDataClient::new(Config::new(None, "http://127.0.0.1:9"));
        let params = HistoryQuery::default().to_params(&clock(), client.api_token());

        let result = client.fetch_history(&params).await;
        assert!(matches!(result, Err(AtrError::MissingCredential)));
    }
}

//! Provider configuration read from the environment.

use std::env;

pub const WTD_DEFAULT_BASE_URL: &str = "https://www.worldtradingdata.com/";
pub const WTD_API_TOKEN_VAR: &str = "WTD_API_TOKEN";
pub const WTD_BASE_URL_VAR: &str = "WTD_BASE_URL";

/// Settings handed to the history client at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` when no token is configured; live fetches will then fail.
    pub api_token: Option<String>,
    pub base_url: String,
}

impl Config {
    pub fn new(api_token: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_token,
            base_url: base_url.into(),
        }
    }

    /// Reads `WTD_API_TOKEN` and `WTD_BASE_URL`. Blank values count as unset.
    pub fn from_env() -> Self {
        Self {
            api_token: env_opt(WTD_API_TOKEN_VAR),
            base_url: env_opt(WTD_BASE_URL_VAR).unwrap_or_else(|| WTD_DEFAULT_BASE_URL.to_string()),
        }
    }

    /// `<base_url>api/v1/history/`, tolerating a base URL without a trailing slash.
    pub fn history_url(&self) -> String {
        format!("{}/api/v1/history/", self.base_url.trim_end_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, WTD_DEFAULT_BASE_URL)
    }
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

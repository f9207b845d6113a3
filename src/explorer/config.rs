// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block explorer client configuration

use std::time::Duration;

use crate::config::constants::{
    DEFAULT_EXPLORER_API_URL, DEFAULT_EXPLORER_MAX_PAGES, DEFAULT_EXPLORER_PAGE_SIZE,
    DEFAULT_EXPLORER_RATE_LIMIT, DEFAULT_EXPLORER_TIMEOUT,
};

/// Configuration for an Etherscan-family explorer API
///
/// The `Debug` output never contains the API key.
///
/// # Example
///
/// ```rust
/// use holderscan::explorer::ExplorerConfig;
///
/// let config = ExplorerConfig::new("my-api-key")
///     .with_chain_id(137)
///     .with_rate_limit(3);
///
/// assert!(!format!("{config:?}").contains("my-api-key"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// API base URL (the `.../api` endpoint)
    pub api_url: String,
    /// API key, sent as the `apikey` query parameter
    pub api_key: String,
    /// Sent as `chainid` when set (multi-chain endpoints)
    pub chain_id: Option<u64>,
    /// Requests per second across all concurrent callers
    pub rate_limit_per_second: u32,
    /// Per-request timeout
    pub timeout: Duration,
    /// Rows per `tokentx` page during holder discovery
    pub page_size: u32,
    /// Maximum pages read during holder discovery
    pub max_pages: u32,
}

impl ExplorerConfig {
    /// Polygonscan defaults with the given API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_EXPLORER_API_URL.to_string(),
            api_key: api_key.into(),
            chain_id: None,
            rate_limit_per_second: DEFAULT_EXPLORER_RATE_LIMIT,
            timeout: DEFAULT_EXPLORER_TIMEOUT,
            page_size: DEFAULT_EXPLORER_PAGE_SIZE,
            max_pages: DEFAULT_EXPLORER_MAX_PAGES,
        }
    }

    /// Set the API base URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the `chainid` parameter
    #[must_use]
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Set the request rate limit
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rate_limit_per_second = requests_per_second;
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the discovery page size and page count
    #[must_use]
    pub fn with_pagination(mut self, page_size: u32, max_pages: u32) -> Self {
        self.page_size = page_size;
        self.max_pages = max_pages;
        self
    }
}

impl std::fmt::Debug for ExplorerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("chain_id", &self.chain_id)
            .field("rate_limit_per_second", &self.rate_limit_per_second)
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::new("key");
        assert_eq!(config.api_url, "https://api.polygonscan.com/api");
        assert_eq!(config.rate_limit_per_second, 5);
        assert_eq!(config.page_size, 10_000);
        assert_eq!(config.max_pages, 1);
        assert_eq!(config.chain_id, None);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ExplorerConfig::new("SECRET123");
        let debug = format!("{config:?}");
        assert!(!debug.contains("SECRET123"));
        assert!(debug.contains("<redacted>"));
    }
}

//! Configuration for holderscan
//!
//! Settings come from the environment (a `.env` file is honoured) or are
//! assembled in code with [`HolderscanConfigBuilder`].
//!
//! | Variable | Default |
//! |---|---|
//! | `RPC_URL` (or `POLYGON_RPC_URL`) | required |
//! | `EXPLORER_API_KEY` (or `POLYGONSCAN_API_KEY`) | required |
//! | `TOKEN_ADDRESS` | required |
//! | `EXPLORER_API_URL` | `https://api.polygonscan.com/api` |
//! | `EXPLORER_CHAIN_ID` | unset |
//! | `EXPLORER_RATE_LIMIT` | 5 requests/s |
//! | `EXPLORER_TIMEOUT_SECS` | 30 |
//! | `EXPLORER_PAGE_SIZE` | 10000 |
//! | `EXPLORER_MAX_PAGES` | 1 |
//! | `RPC_RATE_LIMIT` | unset (unlimited) |
//! | `RPC_TIMEOUT_SECS` | 30 |
//! | `MAX_CONCURRENCY` | 8 |
//! | `API_PORT` | 3000 |
//!
//! `EXPLORER_PAGE_SIZE * EXPLORER_MAX_PAGES` may not exceed the explorer's
//! 10000-row result window.
//!
//! # Example: Builder
//!
//! ```rust
//! use holderscan::HolderscanConfigBuilder;
//! use std::time::Duration;
//!
//! let config = HolderscanConfigBuilder::new(
//!     "https://polygon-rpc.com",
//!     "my-api-key",
//!     "0xc2132D05D31c914a87C6611C10748AEb04B58e8F",
//! )
//! .explorer_rate_limit(3)
//! .rpc_timeout(Duration::from_secs(10))
//! .build()
//! .unwrap();
//!
//! assert_eq!(config.explorer.rate_limit_per_second, 3);
//! ```

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;

use crate::errors::ConfigError;
use crate::explorer::ExplorerConfig;
use crate::provider::ProviderConfig;
use crate::types::address::parse_address;

pub mod constants;

use constants::{
    DEFAULT_API_PORT, DEFAULT_MAX_CONCURRENCY, DEFAULT_RPC_TIMEOUT, EXPLORER_RESULT_WINDOW,
};

const RPC_URL: &str = "RPC_URL";
const POLYGON_RPC_URL: &str = "POLYGON_RPC_URL";
const EXPLORER_API_KEY: &str = "EXPLORER_API_KEY";
const POLYGONSCAN_API_KEY: &str = "POLYGONSCAN_API_KEY";
const TOKEN_ADDRESS: &str = "TOKEN_ADDRESS";
const EXPLORER_API_URL: &str = "EXPLORER_API_URL";
const EXPLORER_CHAIN_ID: &str = "EXPLORER_CHAIN_ID";
const EXPLORER_RATE_LIMIT: &str = "EXPLORER_RATE_LIMIT";
const EXPLORER_TIMEOUT_SECS: &str = "EXPLORER_TIMEOUT_SECS";
const EXPLORER_PAGE_SIZE: &str = "EXPLORER_PAGE_SIZE";
const EXPLORER_MAX_PAGES: &str = "EXPLORER_MAX_PAGES";
const RPC_RATE_LIMIT: &str = "RPC_RATE_LIMIT";
const RPC_TIMEOUT_SECS: &str = "RPC_TIMEOUT_SECS";
const MAX_CONCURRENCY: &str = "MAX_CONCURRENCY";
const API_PORT: &str = "API_PORT";

/// Service configuration
///
/// The `Debug` output never contains the explorer API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderscanConfig {
    /// Chain JSON-RPC endpoint
    pub rpc: ProviderConfig,

    /// Timeout for each contract call
    /// Default: 30 seconds
    pub rpc_timeout: Duration,

    /// Block explorer endpoint, key, pacing and pagination
    pub explorer: ExplorerConfig,

    /// The ERC-20 contract being served
    pub token_address: Address,

    /// Upper bound on in-flight upstream calls per batch
    /// Default: 8
    pub max_concurrency: usize,

    /// HTTP API listen port
    /// Default: 3000
    pub api_port: u16,
}

impl HolderscanConfig {
    /// Load from the process environment, honouring a `.env` file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] if a required variable is absent and
    /// [`ConfigError::Invalid`] if any variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    ///
    /// Empty values are treated as absent.
    ///
    /// ```rust
    /// use holderscan::HolderscanConfig;
    /// use std::collections::HashMap;
    ///
    /// let vars = HashMap::from([
    ///     ("POLYGON_RPC_URL", "https://polygon-rpc.com"),
    ///     ("POLYGONSCAN_API_KEY", "key"),
    ///     ("TOKEN_ADDRESS", "0xc2132d05d31c914a87c6611c10748aeb04b58e8f"),
    ///     ("EXPLORER_PAGE_SIZE", "1000"),
    ///     ("EXPLORER_MAX_PAGES", "3"),
    /// ]);
    ///
    /// let config = HolderscanConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
    /// assert_eq!(config.explorer.max_pages, 3);
    /// assert_eq!(config.api_port, 3000);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let mut builder = HolderscanConfigBuilder::new(
            vars.required(RPC_URL, POLYGON_RPC_URL)?,
            vars.required(EXPLORER_API_KEY, POLYGONSCAN_API_KEY)?,
            vars.get(TOKEN_ADDRESS).ok_or(ConfigError::missing(TOKEN_ADDRESS))?,
        );

        if let Some(url) = vars.get(EXPLORER_API_URL) {
            builder = builder.explorer_api_url(url);
        }
        if let Some(chain_id) = vars.parse(EXPLORER_CHAIN_ID)? {
            builder = builder.explorer_chain_id(chain_id);
        }
        if let Some(rps) = vars.parse(EXPLORER_RATE_LIMIT)? {
            builder = builder.explorer_rate_limit(rps);
        }
        if let Some(secs) = vars.parse(EXPLORER_TIMEOUT_SECS)? {
            builder = builder.explorer_timeout(Duration::from_secs(secs));
        }
        if let Some(page_size) = vars.parse(EXPLORER_PAGE_SIZE)? {
            builder = builder.explorer_page_size(page_size);
        }
        if let Some(max_pages) = vars.parse(EXPLORER_MAX_PAGES)? {
            builder = builder.explorer_max_pages(max_pages);
        }
        if let Some(rps) = vars.parse(RPC_RATE_LIMIT)? {
            builder = builder.rpc_rate_limit(rps);
        }
        if let Some(secs) = vars.parse(RPC_TIMEOUT_SECS)? {
            builder = builder.rpc_timeout(Duration::from_secs(secs));
        }
        if let Some(max) = vars.parse(MAX_CONCURRENCY)? {
            builder = builder.max_concurrency(max);
        }
        if let Some(port) = vars.parse(API_PORT)? {
            builder = builder.api_port(port);
        }

        builder.build()
    }
}

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &'static str, fallback: &'static str) -> Result<String, ConfigError> {
        self.get(name)
            .or_else(|| self.get(fallback))
            .ok_or(ConfigError::missing(name))
    }

    fn parse<T>(&self, name: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(name)
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::invalid(name, format!("{value:?}: {e}")))
            })
            .transpose()
    }
}

/// Builder for [`HolderscanConfig`]
///
/// Starts from the defaults in [`constants`]; [`build`](Self::build)
/// validates the result.
pub struct HolderscanConfigBuilder {
    rpc_url: String,
    token_address: String,
    rpc_rate_limit: Option<u32>,
    rpc_timeout: Duration,
    explorer: ExplorerConfig,
    max_concurrency: usize,
    api_port: u16,
}

impl HolderscanConfigBuilder {
    /// Start from the required settings
    pub fn new(
        rpc_url: impl Into<String>,
        explorer_api_key: impl Into<String>,
        token_address: impl Into<String>,
    ) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            token_address: token_address.into(),
            rpc_rate_limit: None,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            explorer: ExplorerConfig::new(explorer_api_key),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            api_port: DEFAULT_API_PORT,
        }
    }

    /// Set the explorer API base URL
    pub fn explorer_api_url(mut self, url: impl Into<String>) -> Self {
        self.explorer = self.explorer.with_api_url(url);
        self
    }

    /// Send `chainid` with every explorer request
    pub fn explorer_chain_id(mut self, chain_id: u64) -> Self {
        self.explorer = self.explorer.with_chain_id(chain_id);
        self
    }

    /// Explorer requests per second
    pub fn explorer_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.explorer = self.explorer.with_rate_limit(requests_per_second);
        self
    }

    /// Explorer request timeout
    pub fn explorer_timeout(mut self, timeout: Duration) -> Self {
        self.explorer = self.explorer.with_timeout(timeout);
        self
    }

    /// Rows per page during holder discovery
    pub fn explorer_page_size(mut self, page_size: u32) -> Self {
        self.explorer.page_size = page_size;
        self
    }

    /// Pages read during holder discovery
    pub fn explorer_max_pages(mut self, max_pages: u32) -> Self {
        self.explorer.max_pages = max_pages;
        self
    }

    /// Client-side RPC rate limit (requests per second)
    pub fn rpc_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rpc_rate_limit = Some(requests_per_second);
        self
    }

    /// Contract call timeout
    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    /// Batch concurrency bound
    pub fn max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    /// HTTP API listen port
    pub fn api_port(mut self, port: u16) -> Self {
        self.api_port = port;
        self
    }

    /// Validate and build the final configuration
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] for an unusable URL, token address, or a
    /// zero rate, timeout, page size, page count or concurrency.
    pub fn build(self) -> Result<HolderscanConfig, ConfigError> {
        url::Url::parse(&self.rpc_url).map_err(|e| ConfigError::invalid(RPC_URL, e.to_string()))?;
        url::Url::parse(&self.explorer.api_url)
            .map_err(|e| ConfigError::invalid(EXPLORER_API_URL, e.to_string()))?;

        let token_address = parse_address(&self.token_address)
            .map_err(|e| ConfigError::invalid(TOKEN_ADDRESS, e.to_string()))?;

        non_zero(EXPLORER_RATE_LIMIT, u64::from(self.explorer.rate_limit_per_second))?;
        non_zero(EXPLORER_PAGE_SIZE, u64::from(self.explorer.page_size))?;
        non_zero(EXPLORER_MAX_PAGES, u64::from(self.explorer.max_pages))?;
        let window = u64::from(self.explorer.page_size) * u64::from(self.explorer.max_pages);
        if window > u64::from(EXPLORER_RESULT_WINDOW) {
            return Err(ConfigError::invalid(
                EXPLORER_MAX_PAGES,
                format!(
                    "{} pages of {} rows exceed the explorer's {EXPLORER_RESULT_WINDOW}-row result window",
                    self.explorer.max_pages, self.explorer.page_size
                ),
            ));
        }
        non_zero(EXPLORER_TIMEOUT_SECS, self.explorer.timeout.as_millis() as u64)?;
        non_zero(RPC_TIMEOUT_SECS, self.rpc_timeout.as_millis() as u64)?;
        non_zero(MAX_CONCURRENCY, self.max_concurrency as u64)?;
        if let Some(rps) = self.rpc_rate_limit {
            non_zero(RPC_RATE_LIMIT, u64::from(rps))?;
        }

        Ok(HolderscanConfig {
            rpc: ProviderConfig::new(self.rpc_url).with_rate_limit_opt(self.rpc_rate_limit),
            rpc_timeout: self.rpc_timeout,
            explorer: self.explorer,
            token_address,
            max_concurrency: self.max_concurrency,
            api_port: self.api_port,
        })
    }
}

fn non_zero(name: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::invalid(name, "must be greater than zero"))
    } else {
        Ok(())
    }
}

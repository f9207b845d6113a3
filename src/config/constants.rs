//! Default values and well-known constants
//!
//! Centralizes the defaults used by [`HolderscanConfig`](super::HolderscanConfig)
//! and by components constructed without an explicit configuration.

use std::time::Duration;

/// Polygonscan API base URL
pub const DEFAULT_EXPLORER_API_URL: &str = "https://api.polygonscan.com/api";

/// Polygonscan free-tier limit (requests per second)
pub const DEFAULT_EXPLORER_RATE_LIMIT: u32 = 5;

/// Explorer HTTP request timeout
pub const DEFAULT_EXPLORER_TIMEOUT: Duration = Duration::from_secs(30);

/// Etherscan-family APIs reject `tokentx` queries with `page * offset` above this.
pub const EXPLORER_RESULT_WINDOW: u32 = 10_000;

/// Rows per `tokentx` page
pub const DEFAULT_EXPLORER_PAGE_SIZE: u32 = 10_000;

/// Transfer history pages read during holder discovery
pub const DEFAULT_EXPLORER_MAX_PAGES: u32 = 1;

/// Per-call timeout for contract calls
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on in-flight upstream calls per batch
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// HTTP API listen port
pub const DEFAULT_API_PORT: u16 = 3000;

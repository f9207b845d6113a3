//! Span creation helpers for holderscan operations.
//!
//! Telemetry is kept out of the business logic: each instrumented operation
//! has a span helper here, and the operation attaches it with
//! [`tracing::Instrument`] so the span follows the future across `.await`s.
//!
//! ```rust,ignore
//! pub async fn my_operation(&self, n: usize) -> Result<T, QueryError> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(n))
//!     .await
//! }
//! ```

use alloy_primitives::Address;
use tracing::{Level, Span};

/// Span for a single-address balance query.
///
/// Parent: None (root span for this operation)
/// Children: fetch_decimals span
#[inline]
pub(crate) fn balance_of(address: &str) -> Span {
    tracing::span!(Level::INFO, "holderscan.balance_of", address = %address)
}

/// Span for a batch balance query.
///
/// Parent: None, or top_holders
/// Children: fetch_decimals span
#[inline]
pub(crate) fn balances_of(count: usize) -> Span {
    tracing::span!(Level::INFO, "holderscan.balances_of", count = count)
}

/// Span for the top holders ranking.
///
/// Parent: None, or top_holders_with_activity
/// Children: holder_candidates, balances_of spans
#[inline]
pub(crate) fn top_holders(n: usize) -> Span {
    tracing::span!(Level::INFO, "holderscan.top_holders", n = n)
}

/// Span for the top holders ranking enriched with last activity.
///
/// Parent: None (root span for this operation)
/// Children: top_holders span, last_activity spans (one per holder)
#[inline]
pub(crate) fn top_holders_with_activity(n: usize) -> Span {
    tracing::span!(Level::INFO, "holderscan.top_holders_with_activity", n = n)
}

/// Span for the token metadata query.
#[inline]
pub(crate) fn token_info(token: Address) -> Span {
    tracing::span!(Level::INFO, "holderscan.token_info", token = %token)
}

/// Span for the first (and only) `decimals()` fetch.
///
/// Only created by the caller that actually initializes the cache.
#[inline]
pub(crate) fn fetch_decimals(token: Address) -> Span {
    tracing::debug_span!("holderscan.fetch_decimals", token = %token)
}

/// Span for holder candidate discovery through the explorer.
///
/// Children: upstream_request spans (one per page)
#[inline]
pub(crate) fn holder_candidates(token: Address, max_pages: u32) -> Span {
    tracing::debug_span!(
        "holderscan.holder_candidates",
        token = %token,
        max_pages = max_pages,
    )
}

/// Span for one last-activity lookup.
#[inline]
pub(crate) fn last_activity(account: Address) -> Span {
    tracing::debug_span!("holderscan.last_activity", account = %account)
}

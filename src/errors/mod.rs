// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the holderscan library.
//!
//! This module follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`RpcError`],
//!   [`ExplorerError`], [`QueryError`], [`ConfigError`])
//! - **Unified error type** ([`HolderscanError`]) for callers that do not need
//!   to distinguish between error sources
//!
//! # Upstream errors
//!
//! [`RpcError`] and [`ExplorerError`] describe failures of the two upstream
//! dependencies. They are never retried by the query pipeline and always carry
//! the upstream's own diagnostic (status, message, source error) verbatim.
//!
//! # Partial batch failures
//!
//! Batch operations do not raise errors for individual members. A failed
//! balance lookup inside a batch is reported as a zero balance, and a failed
//! activity lookup as [`LastActivity::Error`](crate::LastActivity::Error).
//! Only systemic failures (decimals unavailable, candidate discovery failed)
//! propagate as errors.
//!
//! # Examples
//!
//! ```rust,ignore
//! use holderscan::{QueryError, Aggregator};
//!
//! match aggregator.balance_of("0xnot-an-address").await {
//!     Ok(balance) => println!("balance: {balance}"),
//!     Err(QueryError::InvalidAddress { input }) => eprintln!("bad input: {input}"),
//!     Err(e) if e.is_upstream() => eprintln!("upstream failure: {e}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```

mod config;
mod explorer;
mod query;
mod rpc;

pub use config::ConfigError;
pub use explorer::ExplorerError;
pub use query::QueryError;
pub use rpc::RpcError;

/// Unified error type for all holderscan operations.
///
/// All module-specific error types convert into `HolderscanError` via `From`,
/// so `?` propagates them naturally.
#[derive(Debug, thiserror::Error)]
pub enum HolderscanError {
    /// Error from a query pipeline operation.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Error while loading or validating configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the chain RPC provider outside a query (e.g. provider construction).
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error from the block explorer outside a query (e.g. client construction).
    #[error("Explorer error: {0}")]
    Explorer(#[from] ExplorerError),
}

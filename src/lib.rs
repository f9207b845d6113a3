// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # holderscan
//!
//! Read-only holder queries for a single ERC-20 token: balances, batch
//! balances, top holders (optionally with last-activity dates) and token
//! metadata.
//!
//! Balances and metadata come from the chain over JSON-RPC ([`ChainReader`]);
//! holder discovery and activity come from an Etherscan-compatible block
//! explorer ([`HolderDirectory`]). The [`Aggregator`] combines the two and
//! [`QueryFacade`] exposes the result over HTTP (see [`api`]).
//!
//! ## Library usage
//!
//! ```rust,ignore
//! use holderscan::{bootstrap::build_facade, HolderscanConfig};
//!
//! let config = HolderscanConfig::from_env()?;
//! let facade = build_facade(&config)?;
//!
//! let top = facade.get_top(10).await?;
//! for holder in top.top {
//!     println!("{} {}", holder.address, holder.balance);
//! }
//! ```

pub mod aggregator;
pub mod api;
pub mod bootstrap;
pub mod chain;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod facade;
pub mod provider;
mod spans;
pub mod transport;
pub mod types;

pub use aggregator::Aggregator;
pub use chain::{AlloyTokenContract, ChainReader, TokenContract};
pub use config::{HolderscanConfig, HolderscanConfigBuilder};
pub use errors::{ConfigError, ExplorerError, HolderscanError, QueryError, RpcError};
pub use explorer::{ExplorerConfig, ExplorerTransport, HolderDirectory, TokenTransfer, TransferQuery};
pub use facade::{FacadeError, QueryFacade};
pub use types::address::parse_address;
pub use types::holders::{EnrichedHolderRecord, HolderRecord, LastActivity};
pub use types::metadata::{RawTokenMetadata, TokenMetadata};
pub use types::tokens::{DisplayBalance, TokenAmount, TokenDecimals};

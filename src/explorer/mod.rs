// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block explorer access (Etherscan-family `tokentx` endpoint)
//!
//! - [`ExplorerTransport`]: a `tower::Service` performing one HTTP request
//!   and decoding the response envelope
//! - [`HolderDirectory`]: rate-limited holder discovery and last-activity
//!   lookups on top of any such service
//!
//! Explorer APIs report most failures inside a `200 OK` body as
//! `{"status":"0","message":...,"result":...}`. An empty result
//! (`"No transactions found"`) is not a failure; everything else surfaces as
//! [`ExplorerError::Api`](crate::ExplorerError::Api).

mod config;
mod directory;
mod transport;
mod types;

pub use config::ExplorerConfig;
pub use directory::HolderDirectory;
pub use transport::ExplorerTransport;
pub use types::{decode_transfers, SortOrder, TokenTransfer, TransferQuery};

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain JSON-RPC provider construction
//!
//! The service talks to a single EVM chain over HTTP and only issues read-only
//! `eth_call`s, so one concrete provider type is enough.

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::create_http_provider;

/// Type alias for an HTTP provider using the Ethereum network
pub type EthereumHttpProvider = alloy_provider::RootProvider<alloy_network::Ethereum>;

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_network::Ethereum;
use alloy_provider::ProviderBuilder;
use alloy_rpc_client::ClientBuilder;

use crate::errors::RpcError;
use crate::transport::RateLimitLayer;

use super::config::ProviderConfig;
use super::EthereumHttpProvider;

/// Create an HTTP provider with the given configuration
///
/// Recommended fillers are disabled: the service only issues `eth_call`, so a
/// plain [`RootProvider`](alloy_provider::RootProvider) is all it needs.
///
/// ```rust,ignore
/// use holderscan::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(
///     ProviderConfig::new("https://polygon-rpc.com").with_rate_limit(10),
/// )?;
/// ```
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: ProviderConfig) -> Result<EthereumHttpProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;

    let provider = match config.rate_limit_per_second {
        Some(rps) => {
            let client = ClientBuilder::default()
                .layer(RateLimitLayer::per_second(rps))
                .http(url);

            ProviderBuilder::new()
                .disable_recommended_fillers()
                .network::<Ethereum>()
                .connect_client(client)
        }
        None => ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url),
    };

    Ok(provider)
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport for `tokentx` queries.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use alloy_primitives::Address;

use super::config::ExplorerConfig;
use super::types::{decode_transfers, TokenTransfer, TransferQuery};
use crate::errors::ExplorerError;

/// A Tower service issuing one explorer `tokentx` GET per request.
///
/// Requests are not rate limited here; [`HolderDirectory`](super::HolderDirectory)
/// layers pacing on top. Cloning is cheap and clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ExplorerTransport {
    client: reqwest::Client,
    token: Address,
    config: Arc<ExplorerConfig>,
}

impl ExplorerTransport {
    /// Create a transport for `token`'s transfer history.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(token: Address, config: ExplorerConfig) -> Result<Self, ExplorerError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExplorerError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            token,
            config: Arc::new(config),
        })
    }

    /// The explorer configuration
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub(crate) fn query_params(&self, query: &TransferQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("module", "account".to_string()),
            ("action", "tokentx".to_string()),
            ("contractaddress", self.token.to_checksum(None)),
        ];
        if let Some(account) = query.account {
            params.push(("address", account.to_checksum(None)));
        }
        params.extend([
            ("page", query.page.to_string()),
            ("offset", query.offset.to_string()),
            ("sort", query.sort.as_str().to_string()),
            ("apikey", self.config.api_key.clone()),
        ]);
        if let Some(chain_id) = self.config.chain_id {
            params.push(("chainid", chain_id.to_string()));
        }
        params
    }
}

async fn fetch(
    client: reqwest::Client,
    url: String,
    params: Vec<(&'static str, String)>,
    timeout: Duration,
) -> Result<Vec<TokenTransfer>, ExplorerError> {
    let response = client
        .get(&url)
        .query(&params)
        .send()
        .await
        .map_err(|e| ExplorerError::from_reqwest(e, timeout))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ExplorerError::from_reqwest(e, timeout))?;

    if !status.is_success() {
        return Err(ExplorerError::http_status(
            status.as_u16(),
            &String::from_utf8_lossy(&body),
        ));
    }

    decode_transfers(&body)
}

impl tower::Service<TransferQuery> for ExplorerTransport {
    type Response = Vec<TokenTransfer>;
    type Error = ExplorerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, query: TransferQuery) -> Self::Future {
        let params = self.query_params(&query);
        Box::pin(fetch(
            self.client.clone(),
            self.config.api_url.clone(),
            params,
            self.config.timeout,
        ))
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cached, time-bounded access to one ERC-20 contract.

use std::future::Future;
use std::time::Duration;

use alloy_primitives::Address;
use futures::stream::{self, StreamExt};
use futures::TryFutureExt;
use tokio::sync::OnceCell;
use tracing::{info, Instrument};

use super::contract::TokenContract;
use crate::config::constants::{DEFAULT_MAX_CONCURRENCY, DEFAULT_RPC_TIMEOUT};
use crate::errors::{QueryError, RpcError};
use crate::spans;
use crate::types::address::parse_address;
use crate::types::metadata::RawTokenMetadata;
use crate::types::tokens::{TokenAmount, TokenDecimals};

/// Reads balances and metadata from a [`TokenContract`].
///
/// - `decimals` is fetched lazily on first use and kept for the lifetime of
///   the reader. Concurrent first callers share one in-flight fetch. A failed
///   fetch is never cached; the next caller tries again.
/// - Every contract call is bounded by `call_timeout`. Expiry surfaces as
///   [`RpcError::Timeout`].
/// - Batch reads run at most `max_concurrency` calls at once and return
///   results in input order.
pub struct ChainReader<C> {
    contract: C,
    decimals: OnceCell<TokenDecimals>,
    call_timeout: Duration,
    max_concurrency: usize,
}

impl<C: TokenContract> ChainReader<C> {
    /// Create a reader with default timeout and concurrency
    pub fn new(contract: C) -> Self {
        Self {
            contract,
            decimals: OnceCell::new(),
            call_timeout: DEFAULT_RPC_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Set the per-call timeout
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Set the batch concurrency bound (clamped to at least 1)
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// The token contract address
    pub fn token(&self) -> Address {
        self.contract.address()
    }

    /// The batch concurrency bound
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Token decimals, fetched once and cached.
    pub async fn decimals(&self) -> Result<TokenDecimals, QueryError> {
        let decimals = self
            .decimals
            .get_or_try_init(|| {
                let token = self.token();
                async move {
                    let raw = self.timed("decimals()", self.contract.decimals()).await?;
                    let decimals = TokenDecimals::new(raw);
                    info!(token = %token, decimals = raw, "Cached token decimals");
                    Ok::<_, RpcError>(decimals)
                }
                .instrument(spans::fetch_decimals(token))
            })
            .await?;

        Ok(*decimals)
    }

    /// Raw balance of a user-supplied address.
    ///
    /// Malformed input fails with [`QueryError::InvalidAddress`] before any
    /// network call.
    pub async fn balance(&self, address: &str) -> Result<TokenAmount, QueryError> {
        let account = parse_address(address)?;
        self.balance_of(account).await
    }

    /// Raw balance of an already validated address.
    pub async fn balance_of(&self, account: Address) -> Result<TokenAmount, QueryError> {
        let raw = self
            .timed("balanceOf(address)", self.contract.balance_of(account))
            .await?;
        Ok(TokenAmount::new(raw))
    }

    /// Raw balances of many user-supplied addresses.
    ///
    /// Each entry succeeds or fails on its own; `result[i]` belongs to
    /// `addresses[i]`.
    pub async fn balances<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> Vec<Result<TokenAmount, QueryError>> {
        let parsed: Vec<_> = addresses
            .iter()
            .map(|address| parse_address(address.as_ref()))
            .collect();

        stream::iter(parsed)
            .map(|account| async move { self.balance_of(account?).await })
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    /// Raw balances of many validated addresses, in input order.
    pub async fn balances_of(&self, accounts: &[Address]) -> Vec<Result<TokenAmount, QueryError>> {
        stream::iter(accounts.iter().copied())
            .map(|account| self.balance_of(account))
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    /// `name`, `symbol`, `totalSupply` and `decimals`, fetched concurrently.
    ///
    /// Any failing sub-call fails the whole read. `decimals` comes from the
    /// cache when already known.
    pub async fn metadata(&self) -> Result<RawTokenMetadata, QueryError> {
        let (name, symbol, total_supply, decimals) = tokio::try_join!(
            self.timed("name()", self.contract.name()).err_into::<QueryError>(),
            self.timed("symbol()", self.contract.symbol()).err_into::<QueryError>(),
            self.timed("totalSupply()", self.contract.total_supply())
                .err_into::<QueryError>(),
            self.decimals(),
        )?;

        Ok(RawTokenMetadata {
            name,
            symbol,
            total_supply: TokenAmount::new(total_supply),
            decimals,
        })
    }

    async fn timed<T>(
        &self,
        function: &'static str,
        call: impl Future<Output = Result<T, RpcError>>,
    ) -> Result<T, RpcError> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| RpcError::Timeout {
                function,
                timeout: self.call_timeout,
            })?
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Composite holder queries.
//!
//! The [`Aggregator`] combines a [`ChainReader`] and a [`HolderDirectory`] to
//! answer balance, ranking and activity queries. It owns the concurrency,
//! ordering and partial-failure policy:
//!
//! - Batch results are always in input order, whatever order the underlying
//!   calls complete in.
//! - A failed or invalid member of a balance batch is reported as a zero
//!   balance, not as an error. A failed lookup is therefore indistinguishable
//!   from an empty account in the output; every such degrade is logged at
//!   `warn` with the address and cause.
//! - A failed activity lookup is reported as [`LastActivity::Error`].
//! - Systemic failures (decimals unavailable, holder discovery failed)
//!   propagate as errors.
//!
//! Apart from the decimals cache inside the [`ChainReader`], the aggregator
//! keeps no state between calls.

use std::fmt::Display;

use futures::stream::{self, StreamExt};
use tower::Service;
use tracing::{info, warn, Instrument};

use crate::chain::{ChainReader, TokenContract};
use crate::errors::{ExplorerError, QueryError};
use crate::explorer::{HolderDirectory, TokenTransfer, TransferQuery};
use crate::spans;
use crate::types::holders::{EnrichedHolderRecord, HolderRecord, LastActivity};
use crate::types::metadata::TokenMetadata;
use crate::types::tokens::{DisplayBalance, TokenAmount, TokenDecimals};

/// Answers the composite holder queries for one token.
pub struct Aggregator<C, S> {
    chain: ChainReader<C>,
    directory: HolderDirectory<S>,
}

impl<C, S> Aggregator<C, S>
where
    C: TokenContract,
    S: Service<TransferQuery, Response = Vec<TokenTransfer>, Error = ExplorerError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    pub fn new(chain: ChainReader<C>, directory: HolderDirectory<S>) -> Self {
        Self { chain, directory }
    }

    /// The underlying chain reader
    pub fn chain(&self) -> &ChainReader<C> {
        &self.chain
    }

    /// Balance of one user-supplied address.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidAddress`] before any network call, or the
    /// upstream error of the balance or decimals lookup.
    pub async fn balance_of(&self, address: &str) -> Result<DisplayBalance, QueryError> {
        async move {
            // `balance` is polled first, so a malformed address fails before decimals
            let (raw, decimals) =
                tokio::try_join!(self.chain.balance(address), self.chain.decimals())?;
            raw.normalize(decimals)
        }
        .instrument(spans::balance_of(address))
        .await
    }

    /// Balances of many user-supplied addresses, in input order.
    ///
    /// Failed or invalid entries are reported as `0`. Only a failure to
    /// obtain decimals fails the whole call.
    pub async fn balances_of<A: AsRef<str>>(
        &self,
        addresses: &[A],
    ) -> Result<Vec<DisplayBalance>, QueryError> {
        async move {
            let decimals = self.chain.decimals().await?;
            let results = self.chain.balances(addresses).await;

            let balances: Vec<_> = addresses
                .iter()
                .zip(results)
                .map(|(address, result)| settle(address.as_ref(), result, decimals))
                .collect();

            info!(count = balances.len(), "Fetched balance batch");
            Ok(balances)
        }
        .instrument(spans::balances_of(addresses.len()))
        .await
    }

    /// Up to `n` holders with a positive balance, largest first.
    ///
    /// Candidate discovery returns addresses in transfer-history order, and
    /// only the first `n` candidates are looked up. This bounds the number of
    /// balance calls, at the cost of missing large holders that appear late in
    /// the history. Equal balances keep their candidate order.
    pub async fn top_holders(&self, n: usize) -> Result<Vec<HolderRecord>, QueryError> {
        async move {
            if n == 0 {
                return Ok(Vec::new());
            }

            let mut candidates = self.directory.holder_candidates().await?;
            candidates.truncate(n);
            if candidates.is_empty() {
                return Ok(Vec::new());
            }

            let decimals = self.chain.decimals().await?;
            let results = self.chain.balances_of(&candidates).await;

            let mut holders: Vec<HolderRecord> = candidates
                .into_iter()
                .zip(results)
                .map(|(address, result)| {
                    HolderRecord::new(address, settle(address, result, decimals))
                })
                .filter(|holder| holder.balance.is_positive())
                .collect();

            holders.sort_by(|a, b| b.balance.cmp(&a.balance));
            holders.truncate(n);

            info!(holders = holders.len(), "Ranked top holders");
            Ok(holders)
        }
        .instrument(spans::top_holders(n))
        .await
    }

    /// [`top_holders`](Self::top_holders), each annotated with its last
    /// transfer date.
    ///
    /// Lookups run concurrently (bounded, and paced by the directory's rate
    /// limit). A failed lookup yields [`LastActivity::Error`]; the ranking
    /// itself is unchanged.
    pub async fn top_holders_with_activity(
        &self,
        n: usize,
    ) -> Result<Vec<EnrichedHolderRecord>, QueryError> {
        async move {
            let top = self.top_holders(n).await?;

            let addresses: Vec<_> = top.iter().map(|holder| holder.address).collect();
            let activity: Vec<LastActivity> = stream::iter(addresses)
                .map(|address| async move {
                    match self.directory.last_activity(address).await {
                        Ok(activity) => activity,
                        Err(e) => {
                            warn!(address = %address, error = %e, "Activity lookup failed");
                            LastActivity::Error
                        }
                    }
                })
                .buffered(self.chain.max_concurrency())
                .collect()
                .await;

            Ok(top
                .into_iter()
                .zip(activity)
                .map(|(record, activity)| EnrichedHolderRecord::new(record, activity))
                .collect())
        }
        .instrument(spans::top_holders_with_activity(n))
        .await
    }

    /// Token name, symbol, total supply and decimals.
    pub async fn token_info(&self) -> Result<TokenMetadata, QueryError> {
        let token = self.chain.token();
        async move { TokenMetadata::from_raw(self.chain.metadata().await?) }
            .instrument(spans::token_info(token))
            .await
    }
}

/// Normalize one batch member, degrading any failure to zero.
fn settle(
    address: impl Display,
    result: Result<TokenAmount, QueryError>,
    decimals: TokenDecimals,
) -> DisplayBalance {
    match result.and_then(|raw| raw.normalize(decimals)) {
        Ok(balance) => balance,
        Err(e) => {
            warn!(address = %address, error = %e, "Balance lookup failed, reporting zero");
            DisplayBalance::zero(decimals)
        }
    }
}

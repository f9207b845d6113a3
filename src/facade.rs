//! External request/response contract.
//!
//! [`QueryFacade`] exposes the five queries with serializable responses and a
//! single error type whose message reads `Error fetching <what>: <cause>`.
//! Transport bindings (the HTTP API) only translate to and from these types.

use serde::{Deserialize, Serialize};
use tower::Service;

use crate::aggregator::Aggregator;
use crate::errors::{ExplorerError, QueryError};
use crate::explorer::{TokenTransfer, TransferQuery};
use crate::types::holders::{EnrichedHolderRecord, HolderRecord};
use crate::types::metadata::TokenMetadata;
use crate::types::tokens::DisplayBalance;

/// Which query failed, rendered in the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Single address balance
    Balance,
    /// Batch balances
    Balances,
    /// Top holders by balance
    Top,
    /// Top holders with their last transfer date
    TopWithTransactions,
    /// Token metadata
    TokenInfo,
}

impl Operation {
    fn describe(&self) -> &'static str {
        match self {
            Operation::Balance => "balance",
            Operation::Balances => "balances",
            Operation::Top => "top addresses",
            Operation::TopWithTransactions => "top addresses with transactions",
            Operation::TokenInfo => "token info",
        }
    }
}

/// A failed facade query.
#[derive(Debug, thiserror::Error)]
#[error("Error fetching {}: {source}", .operation.describe())]
pub struct FacadeError {
    /// The query that failed
    pub operation: Operation,
    /// Underlying cause
    #[source]
    pub source: QueryError,
}

impl FacadeError {
    fn wrap(operation: Operation) -> impl FnOnce(QueryError) -> Self {
        move |source| Self { operation, source }
    }
}

/// Body of a batch balance request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceBatchRequest {
    pub addresses: Vec<String>,
}

/// `{"balance": "<decimal>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceResponse {
    pub balance: DisplayBalance,
}

/// Balances in request order, `"0"` for entries that failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalancesResponse {
    pub balances: Vec<DisplayBalance>,
}

/// Ranked holders, largest balance first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopResponse<T> {
    pub top: Vec<T>,
}

/// The query surface bound by the HTTP API.
pub struct QueryFacade<C, S> {
    aggregator: Aggregator<C, S>,
}

impl<C, S> QueryFacade<C, S>
where
    C: crate::chain::TokenContract,
    S: Service<TransferQuery, Response = Vec<TokenTransfer>, Error = ExplorerError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    /// Wrap an aggregator bound to the configured token.
    pub fn new(aggregator: Aggregator<C, S>) -> Self {
        Self { aggregator }
    }

    /// Normalized balance of `address`.
    pub async fn get_balance(&self, address: &str) -> Result<BalanceResponse, FacadeError> {
        let balance = self
            .aggregator
            .balance_of(address)
            .await
            .map_err(FacadeError::wrap(Operation::Balance))?;
        Ok(BalanceResponse { balance })
    }

    /// Failed entries are `"0"`, see [`Aggregator::balances_of`].
    pub async fn get_balance_batch(
        &self,
        request: &BalanceBatchRequest,
    ) -> Result<BalancesResponse, FacadeError> {
        let balances = self
            .aggregator
            .balances_of(&request.addresses)
            .await
            .map_err(FacadeError::wrap(Operation::Balances))?;
        Ok(BalancesResponse { balances })
    }

    /// The `n` largest holders among the first `n` candidates.
    pub async fn get_top(&self, n: usize) -> Result<TopResponse<HolderRecord>, FacadeError> {
        let top = self
            .aggregator
            .top_holders(n)
            .await
            .map_err(FacadeError::wrap(Operation::Top))?;
        Ok(TopResponse { top })
    }

    /// Like [`get_top`](Self::get_top), with each holder's last activity date.
    pub async fn get_top_with_transactions(
        &self,
        n: usize,
    ) -> Result<TopResponse<EnrichedHolderRecord>, FacadeError> {
        let top = self
            .aggregator
            .top_holders_with_activity(n)
            .await
            .map_err(FacadeError::wrap(Operation::TopWithTransactions))?;
        Ok(TopResponse { top })
    }

    /// Name, symbol, decimals and total supply.
    pub async fn get_token_info(&self) -> Result<TokenMetadata, FacadeError> {
        self.aggregator
            .token_info()
            .await
            .map_err(FacadeError::wrap(Operation::TokenInfo))
    }
}

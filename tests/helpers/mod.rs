// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for holderscan integration tests
//!
//! Provides in-memory implementations of the two upstream seams so the query
//! pipeline can be exercised without a node or an explorer.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use holderscan::{
    Aggregator, ChainReader, ExplorerConfig, ExplorerError, HolderDirectory, QueryFacade,
    RpcError, TokenContract, TokenTransfer, TransferQuery,
};

pub const TOKEN: Address = Address::new([0xee; 20]);

/// Shared call counters, readable after the mock has been moved into a reader
#[derive(Debug, Default)]
pub struct CallCounts {
    pub decimals: AtomicUsize,
    pub balance_of: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl CallCounts {
    pub fn decimals(&self) -> usize {
        self.decimals.load(Ordering::SeqCst)
    }

    pub fn balance_of(&self) -> usize {
        self.balance_of.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Mock ERC-20 contract
///
/// Unknown accounts hold zero. Delays are served with `tokio::time::sleep`,
/// so tests can run on paused time.
///
/// ```rust,ignore
/// let mock = MockTokenContract::new(6)
///     .with_balance(alice, 1_000_000)
///     .with_failing(bob)
///     .with_delay(carol, Duration::from_secs(5));
/// let calls = mock.calls();
/// ```
pub struct MockTokenContract {
    decimals: u8,
    balances: HashMap<Address, U256>,
    failing: HashSet<Address>,
    delays: HashMap<Address, Duration>,
    decimals_delay: Duration,
    decimals_failures: AtomicUsize,
    calls: Arc<CallCounts>,
}

impl MockTokenContract {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals,
            balances: HashMap::new(),
            failing: HashSet::new(),
            delays: HashMap::new(),
            decimals_delay: Duration::ZERO,
            decimals_failures: AtomicUsize::new(0),
            calls: Arc::new(CallCounts::default()),
        }
    }

    pub fn with_balance(mut self, account: Address, raw: u64) -> Self {
        self.balances.insert(account, U256::from(raw));
        self
    }

    pub fn with_raw_balance(mut self, account: Address, raw: U256) -> Self {
        self.balances.insert(account, raw);
        self
    }

    /// `balanceOf(account)` fails
    pub fn with_failing(mut self, account: Address) -> Self {
        self.failing.insert(account);
        self
    }

    /// `balanceOf(account)` takes `delay` to answer
    pub fn with_delay(mut self, account: Address, delay: Duration) -> Self {
        self.delays.insert(account, delay);
        self
    }

    /// `decimals()` takes `delay` to answer
    pub fn with_decimals_delay(mut self, delay: Duration) -> Self {
        self.decimals_delay = delay;
        self
    }

    /// The first `times` `decimals()` calls fail
    pub fn with_decimals_failures(self, times: usize) -> Self {
        self.decimals_failures.store(times, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> Arc<CallCounts> {
        Arc::clone(&self.calls)
    }
}

fn node_error(function: &'static str) -> RpcError {
    RpcError::call_failed(function, std::io::Error::other("node unavailable"))
}

#[async_trait]
impl TokenContract for MockTokenContract {
    fn address(&self) -> Address {
        TOKEN
    }

    async fn balance_of(&self, account: Address) -> Result<U256, RpcError> {
        self.calls.balance_of.fetch_add(1, Ordering::SeqCst);
        let now = self.calls.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .delays
            .get(&account)
            .copied()
            .unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;
        self.calls.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&account) {
            return Err(node_error("balanceOf(address)"));
        }
        Ok(self.balances.get(&account).copied().unwrap_or(U256::ZERO))
    }

    async fn decimals(&self) -> Result<u8, RpcError> {
        self.calls.decimals.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.decimals_delay).await;

        let failed = self
            .decimals_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            return Err(node_error("decimals()"));
        }
        Ok(self.decimals)
    }

    async fn name(&self) -> Result<String, RpcError> {
        Ok("Mock Token".to_string())
    }

    async fn symbol(&self) -> Result<String, RpcError> {
        Ok("MOCK".to_string())
    }

    async fn total_supply(&self) -> Result<U256, RpcError> {
        Ok(self.balances.values().copied().sum())
    }
}

/// Mock explorer `tokentx` service
///
/// Holder discovery sees one mint per candidate, in the given order. Activity
/// lookups return the configured timestamp, no rows, or an API error.
#[derive(Clone, Default)]
pub struct MockExplorer {
    candidates: Arc<Vec<Address>>,
    activity: Arc<HashMap<Address, i64>>,
    failing: Arc<HashSet<Address>>,
    history_unavailable: bool,
    queries: Arc<AtomicUsize>,
}

impl MockExplorer {
    pub fn new(candidates: Vec<Address>) -> Self {
        Self {
            candidates: Arc::new(candidates),
            ..Default::default()
        }
    }

    pub fn with_activity(mut self, account: Address, unix_timestamp: i64) -> Self {
        Arc::make_mut(&mut self.activity).insert(account, unix_timestamp);
        self
    }

    pub fn with_failing(mut self, account: Address) -> Self {
        Arc::make_mut(&mut self.failing).insert(account);
        self
    }

    /// History pages fail with an API error
    pub fn history_unavailable(mut self) -> Self {
        self.history_unavailable = true;
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn respond(&self, query: &TransferQuery) -> Result<Vec<TokenTransfer>, ExplorerError> {
        match query.account {
            None if self.history_unavailable => Err(api_error("Max rate limit reached")),
            None => Ok(self
                .candidates
                .iter()
                .skip(((query.page - 1) * query.offset) as usize)
                .take(query.offset as usize)
                .map(|holder| transfer(Address::ZERO, *holder, 0))
                .collect()),
            Some(account) if self.failing.contains(&account) => {
                Err(api_error("Max rate limit reached"))
            }
            Some(account) => Ok(self
                .activity
                .get(&account)
                .map(|ts| vec![transfer(account, TOKEN, *ts)])
                .unwrap_or_default()),
        }
    }
}

fn api_error(message: &str) -> ExplorerError {
    ExplorerError::Api {
        status: "0".to_string(),
        message: "NOTOK".to_string(),
        result: message.to_string(),
    }
}

pub fn transfer(from: Address, to: Address, unix_timestamp: i64) -> TokenTransfer {
    TokenTransfer {
        block_number: "1".to_string(),
        time_stamp: unix_timestamp.to_string(),
        hash: format!("0x{:064x}", unix_timestamp),
        from: from.to_string(),
        to: to.to_string(),
        value: "1".to_string(),
        contract_address: TOKEN.to_string(),
    }
}

impl tower::Service<TransferQuery> for MockExplorer {
    type Response = Vec<TokenTransfer>;
    type Error = ExplorerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, query: TransferQuery) -> Self::Future {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let result = self.respond(&query);
        Box::pin(async move { result })
    }
}

/// Deterministic address from a small integer
pub fn addr(n: u8) -> Address {
    Address::with_last_byte(n)
}

pub fn explorer_config() -> ExplorerConfig {
    ExplorerConfig::new("test-key")
        .with_rate_limit(1_000)
        .with_pagination(100, 1)
}

pub fn aggregator(
    contract: MockTokenContract,
    explorer: MockExplorer,
) -> Aggregator<MockTokenContract, MockExplorer> {
    let chain = ChainReader::new(contract)
        .with_call_timeout(Duration::from_secs(5))
        .with_max_concurrency(4);
    let directory = HolderDirectory::new(TOKEN, explorer, &explorer_config());
    Aggregator::new(chain, directory)
}

pub fn facade(
    contract: MockTokenContract,
    explorer: MockExplorer,
) -> QueryFacade<MockTokenContract, MockExplorer> {
    QueryFacade::new(aggregator(contract, explorer))
}

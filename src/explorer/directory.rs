// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Holder discovery and activity lookup through the explorer.

use std::collections::HashSet;
use std::future::poll_fn;

use alloy_primitives::Address;
use tower::{Layer, Service};
use tracing::{debug, info, Instrument};

use super::config::ExplorerConfig;
use super::types::{TokenTransfer, TransferQuery};
use crate::config::constants::EXPLORER_RESULT_WINDOW;
use crate::errors::ExplorerError;
use crate::spans;
use crate::transport::{LoggingLayer, LoggingService, RateLimitLayer, RateLimitService};
use crate::types::holders::LastActivity;

/// Rate-limited view of the token's transfer history.
///
/// Every request passes one shared token bucket before reaching the
/// underlying service, however many lookups run concurrently.
pub struct HolderDirectory<S> {
    token: Address,
    service: RateLimitService<LoggingService<S>>,
    page_size: u32,
    max_pages: u32,
}

impl<S> HolderDirectory<S>
where
    S: Service<TransferQuery, Response = Vec<TokenTransfer>, Error = ExplorerError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    /// Wrap `service` with the rate limit and pagination from `config`.
    pub fn new(token: Address, service: S, config: &ExplorerConfig) -> Self {
        let service = RateLimitLayer::spaced_per_second(config.rate_limit_per_second)
            .layer(LoggingLayer::new("explorer").layer(service));

        Self {
            token,
            service,
            page_size: config.page_size.clamp(1, EXPLORER_RESULT_WINDOW),
            max_pages: config.max_pages,
        }
    }

    async fn request(&self, query: TransferQuery) -> Result<Vec<TokenTransfer>, ExplorerError> {
        let mut service = self.service.clone();
        poll_fn(|cx| service.poll_ready(cx)).await?;
        service.call(query).await
    }

    /// Every distinct non-zero `from`/`to` address in the token's transfer
    /// history, in first-seen order.
    ///
    /// Reads up to `max_pages` pages oldest first and stops early on a short
    /// page or when the next page would leave the explorer's result window.
    /// The result is a superset of current holders: it includes addresses
    /// that have since sent everything away.
    pub async fn holder_candidates(&self) -> Result<Vec<Address>, ExplorerError> {
        async move {
            let mut seen = HashSet::new();
            let mut candidates = Vec::new();

            for page in 1..=self.max_pages {
                let window_end = u64::from(page) * u64::from(self.page_size);
                if window_end > u64::from(EXPLORER_RESULT_WINDOW) {
                    debug!(page, "Next page exceeds the explorer result window");
                    break;
                }

                let rows = self
                    .request(TransferQuery::history_page(page, self.page_size))
                    .await?;
                debug!(page, rows = rows.len(), "Read transfer history page");

                for address in rows.iter().flat_map(|row| row.participants()) {
                    if !address.is_zero() && seen.insert(address) {
                        candidates.push(address);
                    }
                }

                if rows.len() < self.page_size as usize {
                    break;
                }
            }

            info!(candidates = candidates.len(), "Discovered holder candidates");
            Ok(candidates)
        }
        .instrument(spans::holder_candidates(self.token, self.max_pages))
        .await
    }

    /// UTC date of `account`'s most recent transfer of the token.
    pub async fn last_activity(&self, account: Address) -> Result<LastActivity, ExplorerError> {
        async move {
            let rows = self.request(TransferQuery::latest_for(account)).await?;

            match rows.first() {
                None => Ok(LastActivity::NoTransactions),
                Some(row) => {
                    let timestamp = row.timestamp()?;
                    LastActivity::from_unix_timestamp(timestamp).ok_or_else(|| {
                        ExplorerError::decode(format!("timeStamp {timestamp} out of range"))
                    })
                }
            }
        }
        .instrument(spans::last_activity(account))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::task::{Context, Poll};

    /// Serves canned pages and records the queries it receives.
    #[derive(Clone, Default)]
    struct PagedHistory {
        pages: Arc<Vec<Vec<TokenTransfer>>>,
        queries: Arc<Mutex<Vec<TransferQuery>>>,
    }

    impl Service<TransferQuery> for PagedHistory {
        type Response = Vec<TokenTransfer>;
        type Error = ExplorerError;
        type Future = std::future::Ready<Result<Vec<TokenTransfer>, ExplorerError>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, query: TransferQuery) -> Self::Future {
            let page = self
                .pages
                .get(query.page as usize - 1)
                .cloned()
                .unwrap_or_default();
            self.queries.lock().unwrap().push(query);
            std::future::ready(Ok(page))
        }
    }

    fn transfer(from: Address, to: Address, time_stamp: &str) -> TokenTransfer {
        TokenTransfer {
            block_number: "1".to_string(),
            time_stamp: time_stamp.to_string(),
            hash: "0x00".to_string(),
            from: from.to_string(),
            to: to.to_string(),
            value: "1".to_string(),
            contract_address: Address::repeat_byte(0xee).to_string(),
        }
    }

    fn directory_with(
        pages: Vec<Vec<TokenTransfer>>,
        page_size: u32,
        max_pages: u32,
    ) -> (HolderDirectory<PagedHistory>, PagedHistory) {
        let service = PagedHistory {
            pages: Arc::new(pages),
            ..Default::default()
        };
        let config = ExplorerConfig::new("key")
            .with_rate_limit(1_000)
            .with_pagination(page_size, max_pages);
        (
            HolderDirectory::new(Address::repeat_byte(0xee), service.clone(), &config),
            service,
        )
    }

    #[tokio::test]
    async fn test_candidates_are_distinct_nonzero_in_first_seen_order() {
        let a = Address::repeat_byte(1);
        let b = Address::repeat_byte(2);
        let c = Address::repeat_byte(3);
        let page = vec![
            transfer(Address::ZERO, a, "1"), // mint
            transfer(a, b, "2"),
            transfer(b, a, "3"),
            transfer(c, Address::ZERO, "4"), // burn
        ];
        let (directory, _) = directory_with(vec![page], 10, 1);

        assert_eq!(directory.holder_candidates().await.unwrap(), vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_candidates_paginate_until_short_page() {
        let a = Address::repeat_byte(1);
        let b = Address::repeat_byte(2);
        let c = Address::repeat_byte(3);
        let pages = vec![
            vec![transfer(a, b, "1"), transfer(b, a, "2")],
            vec![transfer(b, c, "3")],
            vec![transfer(c, a, "4"), transfer(a, c, "5")],
        ];
        let (directory, service) = directory_with(pages, 2, 5);

        assert_eq!(directory.holder_candidates().await.unwrap(), vec![a, b, c]);

        let queries = service.queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].page, 2);
        assert_eq!(queries[1].offset, 2);
    }

    #[tokio::test]
    async fn test_candidates_respect_max_pages() {
        let a = Address::repeat_byte(1);
        let b = Address::repeat_byte(2);
        let c = Address::repeat_byte(3);
        let pages = vec![vec![transfer(a, b, "1")], vec![transfer(b, c, "2")]];
        let (directory, service) = directory_with(pages, 1, 1);

        assert_eq!(directory.holder_candidates().await.unwrap(), vec![a, b]);
        assert_eq!(service.queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_last_activity_date_and_empty() {
        let a = Address::repeat_byte(1);
        // 2024-02-29T12:00:00Z
        let (directory, service) = directory_with(vec![vec![transfer(a, a, "1709208000")]], 1, 1);

        assert_eq!(
            directory.last_activity(a).await.unwrap().to_string(),
            "2024-02-29"
        );
        let query = service.queries.lock().unwrap()[0].clone();
        assert_eq!(query, TransferQuery::latest_for(a));

        let (empty, _) = directory_without_rows();
        assert_eq!(
            empty.last_activity(a).await.unwrap(),
            LastActivity::NoTransactions
        );
    }

    #[tokio::test]
    async fn test_last_activity_bad_timestamp_is_error() {
        let a = Address::repeat_byte(1);
        let (directory, _) = directory_with(vec![vec![transfer(a, a, "yesterday")]], 1, 1);

        assert!(matches!(
            directory.last_activity(a).await.unwrap_err(),
            ExplorerError::Decode { .. }
        ));
    }

    fn directory_without_rows() -> (HolderDirectory<PagedHistory>, PagedHistory) {
        directory_with(Vec::new(), 1, 1)
    }

    #[tokio::test]
    async fn test_candidates_stop_at_result_window() {
        let full_page = |byte: u8| -> Vec<TokenTransfer> {
            (0..5_000)
                .map(|_| {
                    transfer(Address::repeat_byte(byte), Address::repeat_byte(byte + 1), "1")
                })
                .collect()
        };
        let pages = vec![full_page(1), full_page(3), full_page(5)];
        let (directory, service) = directory_with(pages, 5_000, 3);

        let candidates = directory.holder_candidates().await.unwrap();

        assert_eq!(candidates.len(), 4);
        let queries = service.queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert!(queries.iter().all(|q| q.page * q.offset <= EXPLORER_RESULT_WINDOW));
    }

    #[tokio::test]
    async fn test_oversized_page_is_clamped_to_result_window() {
        let a = Address::repeat_byte(1);
        let (directory, service) = directory_with(vec![vec![transfer(a, a, "1")]], 50_000, 2);

        assert_eq!(directory.holder_candidates().await.unwrap(), vec![a]);
        assert_eq!(service.queries.lock().unwrap()[0].offset, EXPLORER_RESULT_WINDOW);
    }

    /// Records the virtual time of every request that reaches the explorer.
    #[derive(Clone, Default)]
    struct Stamped {
        calls: Arc<Mutex<Vec<tokio::time::Instant>>>,
    }

    impl Service<TransferQuery> for Stamped {
        type Response = Vec<TokenTransfer>;
        type Error = ExplorerError;
        type Future = std::future::Ready<Result<Vec<TokenTransfer>, ExplorerError>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _query: TransferQuery) -> Self::Future {
            self.calls.lock().unwrap().push(tokio::time::Instant::now());
            std::future::ready(Ok(Vec::new()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_lookups_never_exceed_rate_in_any_second() {
        let rate = 5;
        let service = Stamped::default();
        let config = ExplorerConfig::new("key").with_rate_limit(rate);
        let directory =
            HolderDirectory::new(Address::repeat_byte(0xee), service.clone(), &config);

        let lookups = (1..=10u8).map(|i| directory.last_activity(Address::repeat_byte(i)));
        for result in futures::future::join_all(lookups).await {
            assert_eq!(result.unwrap(), LastActivity::NoTransactions);
        }

        let calls = service.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 10);
        for start in &calls {
            let in_window = calls
                .iter()
                .filter(|t| **t >= *start && **t < *start + std::time::Duration::from_secs(1))
                .count();
            assert!(in_window <= rate as usize, "{in_window} requests within one second");
        }
    }
}

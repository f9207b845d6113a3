// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token bucket rate limiting as a Tower layer.
//!
//! The bucket is shared by every service the layer produces and by every
//! clone of those services, so concurrent callers draw from one budget. The
//! same layer paces explorer requests and, optionally, the RPC client.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use tokio::{sync::Mutex, time::Instant};
use tower::Layer;

/// A Tower layer that paces requests through a shared token bucket.
///
/// The bucket starts full, so up to `requests` calls proceed immediately;
/// after that one token is replenished every `period / requests`.
///
/// # Example
///
/// ```rust,ignore
/// use holderscan::transport::RateLimitLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(RateLimitLayer::per_second(10))
///     .http(rpc_url);
/// ```
#[derive(Clone, Debug)]
pub struct RateLimitLayer {
    bucket: Arc<Mutex<TokenBucket>>,
}

impl RateLimitLayer {
    /// Creates a layer allowing `requests` per `period`.
    ///
    /// A zero `requests` is treated as one.
    pub fn new(requests: u32, period: Duration) -> Self {
        Self {
            bucket: Arc::new(Mutex::new(TokenBucket::new(requests.max(1), period))),
        }
    }

    /// Creates a layer allowing `requests` per second.
    ///
    /// ```rust
    /// use holderscan::transport::RateLimitLayer;
    ///
    /// // Polygonscan free tier
    /// let layer = RateLimitLayer::per_second(5);
    /// ```
    pub fn per_second(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(1))
    }

    /// Creates a layer that spaces requests at least `delay` apart.
    ///
    /// The bucket holds a single token, so there is no initial burst.
    ///
    /// ```rust
    /// use holderscan::transport::RateLimitLayer;
    /// use std::time::Duration;
    ///
    /// let layer = RateLimitLayer::with_min_delay(Duration::from_millis(200));
    /// ```
    pub fn with_min_delay(delay: Duration) -> Self {
        Self::new(1, delay)
    }

    /// Spacing of `1s / requests`, so no one-second window exceeds `requests`.
    pub fn spaced_per_second(requests: u32) -> Self {
        Self::with_min_delay(Duration::from_secs(1) / requests.max(1))
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RateLimitService {
            service,
            bucket: self.bucket.clone(),
        }
    }
}

#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    tokens: f64,
    /// Tokens per nanosecond
    refill_rate: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(requests: u32, period: Duration) -> Self {
        let capacity = f64::from(requests);
        Self {
            capacity,
            tokens: capacity,
            refill_rate: capacity / period.as_nanos() as f64,
            last_refill: Instant::now(),
        }
    }

    /// Take a token, or return how long until one is available.
    fn try_acquire(&mut self) -> Option<Duration> {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            None
        } else {
            let needed = 1.0 - self.tokens;
            Some(Duration::from_nanos((needed / self.refill_rate).ceil() as u64))
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill);
        self.tokens = (self.tokens + elapsed.as_nanos() as f64 * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }
}

async fn acquire(bucket: &Mutex<TokenBucket>) {
    loop {
        let wait = bucket.lock().await.try_acquire();
        match wait {
            None => return,
            Some(duration) => {
                tracing::trace!(wait_ms = duration.as_millis() as u64, "Rate limited, waiting");
                tokio::time::sleep(duration).await;
            }
        }
    }
}

/// A Tower service that waits for a rate limit token before each call.
#[derive(Clone, Debug)]
pub struct RateLimitService<S> {
    service: S,
    bucket: Arc<Mutex<TokenBucket>>,
}

impl<S, Request> tower::Service<Request> for RateLimitService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let bucket = self.bucket.clone();
        let mut service = self.service.clone();

        Box::pin(async move {
            acquire(&bucket).await;
            service.call(request).await
        })
    }
}

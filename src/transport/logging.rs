// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower logging layer for upstream requests.
//!
//! Wraps each request in a `debug` span carrying the request description and
//! records its duration. Failures are logged at `debug`; the caller decides
//! whether a failure is worth a `warn`.

use std::{
    fmt::{Debug, Display},
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::time::Instant;
use tower::Layer;
use tracing::{debug, Instrument};

/// A Tower layer that logs requests and their outcome via `tracing`.
#[derive(Clone, Debug)]
pub struct LoggingLayer {
    target: &'static str,
}

impl LoggingLayer {
    /// Creates a logging layer labelling its spans with `target`
    /// (for example `"explorer"`).
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            target: self.target,
        }
    }
}

/// A Tower service that logs requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    target: &'static str,
}

impl<S, Request> tower::Service<Request> for LoggingService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: Display,
    Request: Debug + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let span = tracing::debug_span!(
            "holderscan.upstream_request",
            upstream = self.target,
            request = ?request,
            duration_ms = tracing::field::Empty,
        );
        let future = self.service.call(request);

        Box::pin(
            async move {
                let start = Instant::now();
                debug!("Upstream request");

                let result = future.await;
                let duration_ms = start.elapsed().as_millis() as u64;
                tracing::Span::current().record("duration_ms", duration_ms);

                match &result {
                    Ok(_) => debug!(duration_ms, "Upstream request completed"),
                    Err(e) => debug!(duration_ms, error = %e, "Upstream request failed"),
                }
                result
            }
            .instrument(span),
        )
    }
}

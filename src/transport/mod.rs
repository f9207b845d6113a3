// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower middleware shared by the upstream clients.
//!
//! [`RateLimitLayer`] paces requests with a token bucket. Every clone of a
//! layered service draws from the same bucket, which is what keeps `n`
//! concurrent explorer lookups under the explorer's published limit.
//! [`LoggingLayer`] records each request in a `debug` span.
//!
//! ```rust,ignore
//! use holderscan::transport::{LoggingLayer, RateLimitLayer};
//! use tower::Layer;
//!
//! let service = RateLimitLayer::per_second(5)
//!     .layer(LoggingLayer::new("explorer").layer(transport));
//! ```

mod logging;
mod rate_limit;

pub use logging::{LoggingLayer, LoggingService};
pub use rate_limit::{RateLimitLayer, RateLimitService};

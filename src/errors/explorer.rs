// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for block explorer API requests.

use std::time::Duration;

/// Longest upstream body excerpt kept in an [`ExplorerError::HttpStatus`].
const MAX_BODY_EXCERPT: usize = 512;

/// Errors that can occur when querying the block explorer.
///
/// The explorer reports failures at two levels: the HTTP status, and an
/// application-level `status`/`message` pair inside a `200 OK` JSON body.
/// Both are surfaced verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// The HTTP request could not be sent or the response could not be read.
    #[error("Explorer request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Explorer request timed out after {timeout:?}")]
    Timeout {
        /// The timeout that expired
        timeout: Duration,
    },

    /// The explorer answered with a non-success HTTP status.
    #[error("Explorer returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body excerpt
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode explorer response: {details}")]
    Decode {
        /// Details about the decode failure
        details: String,
    },

    /// The explorer reported an application-level failure.
    ///
    /// Rate limiting (`"Max rate limit reached"`) and invalid API keys are
    /// reported this way.
    #[error("Explorer API error (status {status}): {message} ({result})")]
    Api {
        /// The payload's `status` field
        status: String,
        /// The payload's `message` field
        message: String,
        /// The payload's `result` field, rendered as text
        result: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build explorer client: {0}")]
    ClientBuild(String),
}

impl ExplorerError {
    /// Create an `HttpStatus` error, truncating very long bodies.
    pub fn http_status(status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_BODY_EXCERPT) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        ExplorerError::HttpStatus { status, body }
    }

    /// Create a `Decode` error with details.
    pub fn decode(details: impl Into<String>) -> Self {
        ExplorerError::Decode {
            details: details.into(),
        }
    }

    /// Map a transport error, distinguishing timeouts.
    pub fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            ExplorerError::Timeout { timeout }
        } else {
            ExplorerError::Request(error)
        }
    }
}

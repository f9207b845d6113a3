// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for query pipeline operations.

use super::{ExplorerError, RpcError};

/// Errors returned by [`ChainReader`](crate::ChainReader),
/// [`HolderDirectory`](crate::HolderDirectory) consumers and the
/// [`Aggregator`](crate::Aggregator).
///
/// # Examples
///
/// ```rust
/// use holderscan::QueryError;
///
/// let err = QueryError::invalid_address("not-an-address");
/// assert!(!err.is_upstream());
/// assert_eq!(err.to_string(), "Invalid address: not-an-address");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The input was not a syntactically valid address.
    ///
    /// Raised before any network call and never retried.
    #[error("Invalid address: {input}")]
    InvalidAddress {
        /// The rejected input
        input: String,
    },

    /// The chain RPC endpoint failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The block explorer failed.
    #[error(transparent)]
    Explorer(#[from] ExplorerError),

    /// A numeric conversion failed.
    #[error("Conversion failed: {details}")]
    Conversion {
        /// Details about the conversion failure
        details: String,
    },
}

impl QueryError {
    /// Create an `InvalidAddress` error for the given input.
    pub fn invalid_address(input: impl Into<String>) -> Self {
        QueryError::InvalidAddress {
            input: input.into(),
        }
    }

    /// Create a `Conversion` error with details.
    pub fn conversion(details: impl Into<String>) -> Self {
        QueryError::Conversion {
            details: details.into(),
        }
    }

    /// Returns true if the error originated in an upstream dependency.
    pub fn is_upstream(&self) -> bool {
        matches!(self, QueryError::Rpc(_) | QueryError::Explorer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rpc_error_is_upstream() {
        let err: QueryError = RpcError::Timeout {
            function: "balanceOf(address)",
            timeout: Duration::from_secs(1),
        }
        .into();
        assert!(err.is_upstream());
        assert!(err.to_string().contains("balanceOf(address)"));
    }

    #[test]
    fn test_explorer_error_is_upstream() {
        let err: QueryError = ExplorerError::decode("expected array").into();
        assert!(err.is_upstream());
    }

    #[test]
    fn test_conversion_is_not_upstream() {
        let err = QueryError::conversion("overflow");
        assert!(!err.is_upstream());
        assert_eq!(err.to_string(), "Conversion failed: overflow");
    }
}

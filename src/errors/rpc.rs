// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! RPC error types for contract calls against the chain endpoint.

use std::time::Duration;

/// Errors that can occur while calling the token contract over JSON-RPC.
///
/// Each variant names the contract function that was being called so that a
/// failure deep inside a batch is still attributable.
///
/// # Examples
///
/// ```rust
/// use holderscan::RpcError;
/// use std::time::Duration;
///
/// let error = RpcError::Timeout {
///     function: "balanceOf(address)",
///     timeout: Duration::from_secs(30),
/// };
/// assert!(error.to_string().contains("balanceOf"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The `eth_call` itself failed or its return data could not be decoded.
    ///
    /// This covers transport failures, node-side reverts and ABI decoding
    /// errors. The upstream error is preserved as the source.
    #[error("Contract call {function} failed: {source}")]
    CallFailed {
        /// Solidity signature of the function that was called
        function: &'static str,
        /// The underlying provider or decoding error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The contract call did not complete within the configured timeout.
    #[error("Contract call {function} timed out after {timeout:?}")]
    Timeout {
        /// Solidity signature of the function that was called
        function: &'static str,
        /// The timeout that expired
        timeout: Duration,
    },

    /// The RPC endpoint URL could not be parsed.
    #[error("Invalid RPC URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create a `CallFailed` error from any error type.
    pub fn call_failed(
        function: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::CallFailed {
            function,
            source: Box::new(source),
        }
    }

    /// Returns true if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RpcError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_failed_preserves_source_message() {
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = RpcError::call_failed("decimals()", source);

        let message = err.to_string();
        assert!(message.contains("decimals()"));
        assert!(message.contains("connection refused"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_timeout_display() {
        let err = RpcError::Timeout {
            function: "totalSupply()",
            timeout: Duration::from_millis(1500),
        };
        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "Contract call totalSupply() timed out after 1.5s"
        );
    }
}

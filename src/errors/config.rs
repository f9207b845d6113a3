// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Startup configuration errors.
//!
//! Every variant is fatal: the service refuses to start rather than serve
//! requests with an incomplete configuration.

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is not present.
    #[error("Missing required setting {name}")]
    Missing {
        /// Name of the environment variable
        name: &'static str,
    },

    /// A setting is present but cannot be used.
    #[error("Invalid value for {name}: {reason}")]
    Invalid {
        /// Name of the environment variable
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create a `Missing` error.
    pub fn missing(name: &'static str) -> Self {
        ConfigError::Missing { name }
    }

    /// Create an `Invalid` error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            name,
            reason: reason.into(),
        }
    }
}

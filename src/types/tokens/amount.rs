// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw token amount type

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::balance::DisplayBalance;
use super::decimals::TokenDecimals;
use crate::errors::QueryError;

/// Raw token amount as returned by `balanceOf` / `totalSupply`
///
/// This is the chain-native smallest unit. To convert to a human-readable
/// balance, use [`normalize`](Self::normalize) with the token's
/// [`TokenDecimals`].
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use holderscan::{TokenAmount, TokenDecimals};
///
/// // 1.5 tokens with 18 decimals
/// let amount = TokenAmount::new(U256::from(1_500_000_000_000_000_000u64));
/// let balance = amount.normalize(TokenDecimals::new(18)).unwrap();
/// assert_eq!(balance.to_string(), "1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// Zero token amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new token amount from U256
    pub const fn new(amount: U256) -> Self {
        Self(amount)
    }

    /// Get the inner U256 value
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Whether the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Normalize by token decimals: amount / 10^decimals
    ///
    /// The conversion is exact.
    pub fn normalize(&self, decimals: TokenDecimals) -> Result<DisplayBalance, QueryError> {
        DisplayBalance::from_raw(*self, decimals)
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Human-readable token balance type

use std::cmp::Ordering;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Serialize, Serializer};

use super::amount::TokenAmount;
use super::decimals::TokenDecimals;
use crate::errors::QueryError;

/// Token balance normalized by decimals: `raw / 10^decimals`
///
/// The value is held exactly as an arbitrary-precision decimal, so very large
/// supplies or 18-decimal tokens never lose precision when ranked or
/// displayed. [`as_f64`](Self::as_f64) provides the lossy floating-point view.
///
/// Balances render as plain decimal strings with trailing zeros trimmed
/// (`"1.5"`, `"5"`, `"0.000001"`) and serialize the same way.
///
/// # Examples
///
/// ```
/// use holderscan::{DisplayBalance, TokenAmount, TokenDecimals};
///
/// let balance = DisplayBalance::from_raw(TokenAmount::from(1_230_000u64), TokenDecimals::new(6)).unwrap();
/// assert_eq!(balance.to_string(), "1.23");
/// assert!(balance.is_positive());
///
/// let zero = DisplayBalance::zero(TokenDecimals::new(6));
/// assert_eq!(zero.to_string(), "0");
/// assert!(balance > zero);
/// ```
#[derive(Debug, Clone)]
pub struct DisplayBalance {
    value: BigDecimal,
    raw: TokenAmount,
    decimals: TokenDecimals,
}

impl DisplayBalance {
    /// Normalize a raw amount by the token's decimals.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Conversion`] if the raw amount cannot be
    /// represented as a decimal.
    pub fn from_raw(raw: TokenAmount, decimals: TokenDecimals) -> Result<Self, QueryError> {
        let digits = BigDecimal::from_str(&raw.to_string()).map_err(|e| {
            QueryError::conversion(format!("Failed to convert {raw} to BigDecimal: {e}"))
        })?;
        let (mantissa, _) = digits.into_bigint_and_exponent();

        Ok(Self {
            value: BigDecimal::new(mantissa, i64::from(decimals.as_u8())),
            raw,
            decimals,
        })
    }

    /// A zero balance, used as the sentinel for failed batch lookups.
    pub fn zero(decimals: TokenDecimals) -> Self {
        Self {
            value: BigDecimal::from(0u8),
            raw: TokenAmount::ZERO,
            decimals,
        }
    }

    /// The exact decimal value
    pub fn value(&self) -> &BigDecimal {
        &self.value
    }

    /// The raw on-chain amount this balance was derived from
    pub fn raw(&self) -> TokenAmount {
        self.raw
    }

    /// The decimals used for normalization
    pub fn decimals(&self) -> TokenDecimals {
        self.decimals
    }

    /// Whether the balance is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        !self.raw.is_zero()
    }

    /// Floating-point approximation (may lose precision for large amounts)
    pub fn as_f64(&self) -> f64 {
        let amount = self.raw.to_string().parse::<f64>().unwrap_or_else(|e| {
            tracing::warn!(
                amount = %self.raw,
                error = %e,
                "Failed to parse token amount to f64, using 0.0"
            );
            0.0
        });
        amount / self.decimals.divisor()
    }
}

impl PartialEq for DisplayBalance {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for DisplayBalance {}

impl PartialOrd for DisplayBalance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DisplayBalance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl std::fmt::Display for DisplayBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.raw.to_string();
        let scale = usize::from(self.decimals.as_u8());
        if scale == 0 {
            return f.write_str(&digits);
        }

        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            f.write_str(whole)
        } else {
            write!(f, "{whole}.{fraction}")
        }
    }
}

impl Serialize for DisplayBalance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

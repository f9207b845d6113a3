//! Token decimal precision type

use serde::{Deserialize, Serialize};

/// ERC-20 token decimal precision
///
/// The number of decimal places the token uses to present raw amounts. The
/// value is immutable for a deployed contract, which is what allows
/// [`ChainReader`](crate::ChainReader) to fetch it once per process.
///
/// # Examples
///
/// ```
/// use holderscan::TokenDecimals;
///
/// let decimals = TokenDecimals::new(6);
/// assert_eq!(decimals.as_u8(), 6);
/// assert_eq!(decimals.divisor(), 1_000_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Create a new decimal precision value
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Floating-point divisor 10^decimals
    pub fn divisor(&self) -> f64 {
        10_f64.powi(self.0 as i32)
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_decimals_divisor() {
        assert_eq!(TokenDecimals::new(0).divisor(), 1.0);
        assert_eq!(TokenDecimals::new(8).divisor(), 100_000_000.0);
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(format!("{}", TokenDecimals::new(18)), "18 decimals");
    }

    #[test]
    fn test_serialization_is_a_plain_number() {
        let json = serde_json::to_string(&TokenDecimals::new(18)).unwrap();
        assert_eq!(json, "18");
    }
}

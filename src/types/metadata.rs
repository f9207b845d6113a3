//! Token metadata as returned by the token info query.

use serde::Serialize;

use super::tokens::{DisplayBalance, TokenAmount, TokenDecimals};

/// Raw token metadata read from the contract, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTokenMetadata {
    /// `name()`
    pub name: String,
    /// `symbol()`
    pub symbol: String,
    /// `totalSupply()` in raw units
    pub total_supply: TokenAmount,
    /// `decimals()`
    pub decimals: TokenDecimals,
}

/// Human-readable token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "totalSupply")]
    pub total_supply: DisplayBalance,
    pub decimals: u8,
}

impl TokenMetadata {
    /// Normalize raw metadata, converting the total supply by the token's decimals.
    pub fn from_raw(raw: RawTokenMetadata) -> Result<Self, crate::QueryError> {
        Ok(Self {
            total_supply: raw.total_supply.normalize(raw.decimals)?,
            decimals: raw.decimals.as_u8(),
            name: raw.name,
            symbol: raw.symbol,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_normalizes_supply() {
        let raw = RawTokenMetadata {
            name: "Test Token".to_string(),
            symbol: "TST".to_string(),
            total_supply: TokenAmount::from(21_000_000_000_000u64),
            decimals: TokenDecimals::new(6),
        };
        let metadata = TokenMetadata::from_raw(raw).unwrap();

        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            serde_json::json!({
                "name": "Test Token",
                "symbol": "TST",
                "totalSupply": "21000000",
                "decimals": 6,
            })
        );
    }
}

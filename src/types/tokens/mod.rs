//! Strong types for token-related values
//!
//! This module provides newtype wrappers for token amounts
//! to prevent mixing raw on-chain units with human-readable values.
//!
//! # Type Relationships
//!
//! ```text
//! TokenAmount (U256, raw)
//!     |
//!     | normalize(TokenDecimals)
//!     ↓
//! DisplayBalance (exact decimal, human-readable)
//! ```

mod amount;
mod balance;
mod decimals;

pub use amount::TokenAmount;
pub use balance::DisplayBalance;
pub use decimals::TokenDecimals;

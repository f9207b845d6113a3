//! Chain access for the configured token contract
//!
//! [`TokenContract`] performs single typed `eth_call`s. [`ChainReader`] adds
//! the decimals cache, per-call timeouts and bounded batch reads on top.

mod contract;
mod reader;

pub use contract::{AlloyTokenContract, TokenContract, IERC20};
pub use reader::ChainReader;

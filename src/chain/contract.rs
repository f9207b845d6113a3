// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed ERC-20 contract calls.
//!
//! [`TokenContract`] is the seam between the query pipeline and the chain.
//! [`AlloyTokenContract`] implements it with `eth_call`s through an alloy
//! provider; tests substitute an in-memory implementation.

use alloy_network::{Ethereum, TransactionBuilder};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;

use crate::errors::RpcError;

sol! {
    /// Read-only subset of the ERC-20 interface.
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
        function name() external view returns (string);
        function symbol() external view returns (string);
        function totalSupply() external view returns (uint256);
    }
}

/// Read-only calls against one ERC-20 contract.
///
/// Implementations perform exactly one upstream call per method invocation and
/// do not cache; caching and timeouts are layered on by
/// [`ChainReader`](super::ChainReader).
#[async_trait]
pub trait TokenContract: Send + Sync {
    /// The contract address
    fn address(&self) -> Address;

    /// `balanceOf(account)`
    async fn balance_of(&self, account: Address) -> Result<U256, RpcError>;

    /// `decimals()`
    async fn decimals(&self) -> Result<u8, RpcError>;

    /// `name()`
    async fn name(&self) -> Result<String, RpcError>;

    /// `symbol()`
    async fn symbol(&self) -> Result<String, RpcError>;

    /// `totalSupply()`
    async fn total_supply(&self) -> Result<U256, RpcError>;
}

/// [`TokenContract`] backed by an alloy provider.
#[derive(Debug, Clone)]
pub struct AlloyTokenContract<P> {
    address: Address,
    provider: P,
}

impl<P> AlloyTokenContract<P>
where
    P: Provider<Ethereum>,
{
    /// Bind to the token contract at `address`
    pub fn new(address: Address, provider: P) -> Self {
        Self { address, provider }
    }

    async fn call<C: SolCall>(&self, call: C) -> Result<C::Return, RpcError> {
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(call.abi_encode());

        let output = self
            .provider
            .call(tx)
            .await
            .map_err(|e| RpcError::call_failed(C::SIGNATURE, e))?;

        C::abi_decode_returns(&output).map_err(|e| RpcError::call_failed(C::SIGNATURE, e))
    }
}

#[async_trait]
impl<P> TokenContract for AlloyTokenContract<P>
where
    P: Provider<Ethereum> + Send + Sync,
{
    fn address(&self) -> Address {
        self.address
    }

    async fn balance_of(&self, account: Address) -> Result<U256, RpcError> {
        self.call(IERC20::balanceOfCall { account }).await
    }

    async fn decimals(&self) -> Result<u8, RpcError> {
        self.call(IERC20::decimalsCall {}).await
    }

    async fn name(&self) -> Result<String, RpcError> {
        self.call(IERC20::nameCall {}).await
    }

    async fn symbol(&self) -> Result<String, RpcError> {
        self.call(IERC20::symbolCall {}).await
    }

    async fn total_supply(&self) -> Result<U256, RpcError> {
        self.call(IERC20::totalSupplyCall {}).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_signatures() {
        assert_eq!(IERC20::balanceOfCall::SIGNATURE, "balanceOf(address)");
        assert_eq!(IERC20::decimalsCall::SIGNATURE, "decimals()");
        assert_eq!(IERC20::totalSupplyCall::SIGNATURE, "totalSupply()");
    }

    #[test]
    fn test_balance_of_calldata() {
        let account = Address::repeat_byte(0x11);
        let calldata = IERC20::balanceOfCall { account }.abi_encode();

        // selector + one 32-byte word
        assert_eq!(calldata.len(), 36);
        assert_eq!(&calldata[..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(&calldata[16..36], account.as_slice());
    }

    #[test]
    fn test_decode_decimals_return() {
        let mut word = [0u8; 32];
        word[31] = 6;
        assert_eq!(IERC20::decimalsCall::abi_decode_returns(&word).unwrap(), 6);
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Address validation for untrusted input.
//!
//! Addresses arrive as user-supplied strings. They must be `0x`-prefixed, 40
//! hex characters long, and, when written in mixed case, carry a valid EIP-55
//! checksum. All-lowercase and all-uppercase spellings carry no checksum and
//! are accepted as-is.

use alloy_primitives::Address;
use serde::Serializer;

use crate::errors::QueryError;

const ADDRESS_HEX_LEN: usize = 40;

/// Parse and validate a user-supplied address.
///
/// # Errors
///
/// Returns [`QueryError::InvalidAddress`] for wrong length, non-hex characters,
/// a missing `0x` prefix, or a mixed-case spelling with a bad checksum.
///
/// # Examples
///
/// ```
/// use holderscan::parse_address;
///
/// assert!(parse_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").is_ok());
/// assert!(parse_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_ok());
/// assert!(parse_address("not-an-address").is_err());
/// ```
pub fn parse_address(input: &str) -> Result<Address, QueryError> {
    let hex = input
        .strip_prefix("0x")
        .ok_or_else(|| QueryError::invalid_address(input))?;

    if hex.len() != ADDRESS_HEX_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(QueryError::invalid_address(input));
    }

    let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());

    let parsed = if has_lower && has_upper {
        Address::parse_checksummed(input, None).ok()
    } else {
        input.parse::<Address>().ok()
    };

    parsed.ok_or_else(|| QueryError::invalid_address(input))
}

/// Serialize an address in EIP-55 checksummed form.
pub(crate) fn serialize_checksummed<S: Serializer>(
    address: &Address,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}

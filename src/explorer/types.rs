//! Explorer request and response types

use alloy_primitives::Address;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ExplorerError;

/// Message the explorer returns with `status: "0"` for an empty result
const NO_TRANSACTIONS_MESSAGE: &str = "No transactions found";

/// Result ordering by block number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One `module=account&action=tokentx` request for the configured token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    /// Restrict to transfers involving this account
    pub account: Option<Address>,
    /// 1-based page number
    pub page: u32,
    /// Rows per page
    pub offset: u32,
    pub sort: SortOrder,
}

impl TransferQuery {
    /// A page of the token's full transfer history, oldest first
    pub fn history_page(page: u32, offset: u32) -> Self {
        Self {
            account: None,
            page,
            offset,
            sort: SortOrder::Asc,
        }
    }

    /// The single most recent transfer involving `account`
    pub fn latest_for(account: Address) -> Self {
        Self {
            account: Some(account),
            page: 1,
            offset: 1,
            sort: SortOrder::Desc,
        }
    }
}

/// One `tokentx` row.
///
/// Explorer APIs encode every field as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub contract_address: String,
}

impl TokenTransfer {
    /// Unix timestamp in seconds
    pub fn timestamp(&self) -> Result<i64, ExplorerError> {
        self.time_stamp
            .parse()
            .map_err(|e| ExplorerError::decode(format!("invalid timeStamp {:?}: {e}", self.time_stamp)))
    }

    /// `from` and `to`, skipping any that do not parse
    pub fn participants(&self) -> impl Iterator<Item = Address> + '_ {
        [self.from.as_str(), self.to.as_str()]
            .into_iter()
            .filter_map(|s| s.parse::<Address>().ok())
    }
}

/// Etherscan-style response envelope
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: String,
    #[serde(default)]
    result: Value,
}

/// Decode a `tokentx` response body.
///
/// - `status: "1"`: `result` is the row array.
/// - `status: "0"` with `"No transactions found"` or an empty array: no rows.
/// - Anything else is an [`ExplorerError::Api`], carrying the upstream
///   `status`, `message` and `result` verbatim (rate limiting and bad API
///   keys are reported this way).
pub fn decode_transfers(body: &[u8]) -> Result<Vec<TokenTransfer>, ExplorerError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| ExplorerError::decode(format!("invalid envelope: {e}")))?;

    if envelope.status == "1" {
        return serde_json::from_value(envelope.result)
            .map_err(|e| ExplorerError::decode(format!("invalid tokentx rows: {e}")));
    }

    let empty_result = matches!(&envelope.result, Value::Array(rows) if rows.is_empty());
    if envelope.message == NO_TRANSACTIONS_MESSAGE || empty_result {
        return Ok(Vec::new());
    }

    let result = match envelope.result {
        Value::String(s) => s,
        other => other.to_string(),
    };
    Err(ExplorerError::Api {
        status: envelope.status,
        message: envelope.message,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"{
        "blockNumber": "4730207",
        "timeStamp": "1513240363",
        "hash": "0xe8c208398bd5ae8e4c237658580db56a2a94dfa0ca382c99b776fa6e7d31d5b4",
        "nonce": "406",
        "blockHash": "0x022c5e6a3d2487a8ccf8946a2ffb74938bf8e5c8a3f6d91b41c56378a02b7a1a",
        "from": "0x642ae78fafbb8032da552d619ad43f1d81e4dd7c",
        "contractAddress": "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2",
        "to": "0x4e83362442b8d1bec281594cea3050c8eb01311c",
        "value": "5901522149285533025181",
        "tokenName": "Maker",
        "tokenSymbol": "MKR",
        "tokenDecimal": "18"
    }"#;

    #[test]
    fn test_decode_rows() {
        let body = format!(r#"{{"status":"1","message":"OK","result":[{ROW}]}}"#);
        let rows = decode_transfers(body.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].timestamp().unwrap(), 1_513_240_363);
        assert_eq!(rows[0].participants().count(), 2);
    }

    #[test]
    fn test_no_transactions_is_empty() {
        let body = br#"{"status":"0","message":"No transactions found","result":[]}"#;
        assert!(decode_transfers(body).unwrap().is_empty());
    }

    #[test]
    fn test_rate_limit_is_api_error() {
        let body = br#"{"status":"0","message":"NOTOK","result":"Max rate limit reached"}"#;
        match decode_transfers(body).unwrap_err() {
            ExplorerError::Api {
                status,
                message,
                result,
            } => {
                assert_eq!(status, "0");
                assert_eq!(message, "NOTOK");
                assert_eq!(result, "Max rate limit reached");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_is_decode_error() {
        let err = decode_transfers(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ExplorerError::Decode { .. }));
    }

    #[test]
    fn test_malformed_rows_are_decode_error() {
        let body = br#"{"status":"1","message":"OK","result":[{"from":"0x1"}]}"#;
        assert!(matches!(
            decode_transfers(body).unwrap_err(),
            ExplorerError::Decode { .. }
        ));
    }

    #[test]
    fn test_latest_for_query_shape() {
        let account = Address::repeat_byte(0x42);
        let query = TransferQuery::latest_for(account);
        assert_eq!(query.account, Some(account));
        assert_eq!(query.offset, 1);
        assert_eq!(query.sort, SortOrder::Desc);
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Holder records produced by the ranking pipeline.

use alloy_primitives::Address;
use chrono::{DateTime, NaiveDate};
use serde::{Serialize, Serializer};

use super::address::serialize_checksummed;
use super::tokens::DisplayBalance;

/// A discovered address paired with its current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolderRecord {
    /// Holder address
    #[serde(serialize_with = "serialize_checksummed")]
    pub address: Address,
    /// Current balance
    pub balance: DisplayBalance,
}

impl HolderRecord {
    /// Create a new holder record
    pub fn new(address: Address, balance: DisplayBalance) -> Self {
        Self { address, balance }
    }
}

/// Outcome of a last-activity lookup.
///
/// `NoTransactions` and `Error` are deliberately distinct: the first is a
/// legitimate answer from the explorer, the second means the lookup failed.
///
/// Renders as `YYYY-MM-DD`, `"No transactions found"` or `"Error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastActivity {
    /// UTC date of the most recent transfer
    Date(NaiveDate),
    /// The explorer has no transfers of this token for the address
    NoTransactions,
    /// The lookup failed
    Error,
}

impl LastActivity {
    /// Marker text for [`LastActivity::NoTransactions`]
    pub const NO_TRANSACTIONS: &'static str = "No transactions found";
    /// Marker text for [`LastActivity::Error`]
    pub const ERROR: &'static str = "Error";

    /// Build from a unix timestamp in seconds, taking the UTC date.
    ///
    /// Returns `None` if the timestamp is out of chrono's range.
    pub fn from_unix_timestamp(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|dt| Self::Date(dt.date_naive()))
    }
}

impl std::fmt::Display for LastActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::NoTransactions => f.write_str(Self::NO_TRANSACTIONS),
            Self::Error => f.write_str(Self::ERROR),
        }
    }
}

impl Serialize for LastActivity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A [`HolderRecord`] annotated with the holder's last activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedHolderRecord {
    /// Holder address
    #[serde(serialize_with = "serialize_checksummed")]
    pub address: Address,
    /// Current balance
    pub balance: DisplayBalance,
    /// Date of the most recent transfer, or a marker
    pub last_transaction_date: LastActivity,
}

impl EnrichedHolderRecord {
    /// Attach a last-activity outcome to a holder record
    pub fn new(record: HolderRecord, last_transaction_date: LastActivity) -> Self {
        Self {
            address: record.address,
            balance: record.balance,
            last_transaction_date,
        }
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across holderscan.
//!
//! This module provides newtype wrappers and records for:
//! - Validated addresses
//! - Raw and display token amounts, token decimals
//! - Holder records and last-activity markers
//! - Token metadata

pub mod address;
pub mod holders;
pub mod metadata;
pub mod tokens;

// Note: Public types are re-exported from lib.rs, not here

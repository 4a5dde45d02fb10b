//! Parsing of addresses and amounts supplied as text.
//!
//! Both functions fail with `CalldataError::InvalidParameter` so that bad
//! input is rejected before any encoder or chain read runs.

use crate::{Amount, CalldataError};
use alloy_primitives::{Address, U256};

use super::formatting::with_0x_prefix;

/// Parses a hex address, with or without "0x" prefix, in any letter case.
pub fn parse_address(value: &str) -> Result<Address, CalldataError> {
	let trimmed = value.trim();
	with_0x_prefix(trimmed)
		.parse::<Address>()
		.map_err(|e| CalldataError::InvalidParameter(format!("Invalid address '{}': {}", value, e)))
}

/// Parses a base-10 token amount in its smallest unit.
///
/// Negative, fractional, empty and out-of-range inputs are rejected; no
/// decimal scaling is applied.
pub fn parse_amount(value: &str) -> Result<Amount, CalldataError> {
	let trimmed = value.trim();
	if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
		return Err(CalldataError::InvalidParameter(format!(
			"Invalid amount '{}': expected an unsigned integer in the smallest token unit",
			value
		)));
	}
	U256::from_str_radix(trimmed, 10)
		.map_err(|e| CalldataError::InvalidParameter(format!("Invalid amount '{}': {}", value, e)))
}

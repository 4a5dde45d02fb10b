//! String formatting utilities.
//!
//! Provides hex prefix management and human-readable token amounts for logs
//! and planner output.

use alloy_primitives::U256;

/// Adds "0x" prefix to a hex string if it doesn't already have one.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.to_lowercase().starts_with("0x") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Formats a raw token amount with its decimal places for display.
///
/// # Arguments
///
/// * `amount` - The raw on-chain amount
/// * `decimals` - The number of decimal places for the token
///
/// # Returns
///
/// A formatted string like "1.5" or "1000", trailing zeros removed.
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
	let raw = amount.to_string();
	if decimals == 0 {
		return raw;
	}

	let decimal_places = decimals as usize;

	let (integer_part, decimal_part) = if raw.len() <= decimal_places {
		let decimal_str = format!("{:0>width$}", raw, width = decimal_places);
		("0".to_string(), decimal_str)
	} else {
		let split_pos = raw.len() - decimal_places;
		(raw[..split_pos].to_string(), raw[split_pos..].to_string())
	};

	let decimal_trimmed = decimal_part.trim_end_matches('0');

	if decimal_trimmed.is_empty() {
		integer_part
	} else {
		format!("{}.{}", integer_part, decimal_trimmed)
	}
}

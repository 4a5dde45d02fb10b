//! Slippage-adjusted minimum output.
//!
//! `floor(amount * (10000 - bps) / 10000)`, integer arithmetic only. Truncating
//! division never rounds the guaranteed minimum above what the quote allows.

use intent_types::{Amount, CalldataError, SlippageBps, BPS_DENOMINATOR, U256};

/// Applies a raw basis-point tolerance to a quoted amount.
///
/// Fails with `InvalidParameter` when `slippage_bps >= 10000` instead of
/// returning a zero minimum.
pub fn apply_slippage(amount: Amount, slippage_bps: u16) -> Result<Amount, CalldataError> {
	Ok(min_output(amount, SlippageBps::new(slippage_bps)?))
}

/// Applies a validated tolerance to a quoted amount.
///
/// The amount is split as `q * 10000 + r` so that the intermediate product
/// stays within 256 bits for every input, `U256::MAX` included.
pub fn min_output(amount: Amount, slippage: SlippageBps) -> Amount {
	let denominator = U256::from(BPS_DENOMINATOR);
	let retained = U256::from(slippage.retained_bps());

	let whole = amount / denominator;
	let remainder = amount % denominator;

	whole * retained + remainder * retained / denominator
}

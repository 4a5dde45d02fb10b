//! ERC-20 approval encoding.

use intent_types::{Address, Amount, EncodedCall, IERC20};

/// Encodes `approve(spender, amount)`.
///
/// Called once with a provisional amount before the bridge quote is known and
/// again with the settled output amount; each call is independent.
pub fn encode_approval(spender: Address, amount: Amount) -> EncodedCall {
	EncodedCall::from_call(&IERC20::approveCall {
		spender,
		value: amount,
	})
}

//! Contract interfaces used on the destination chain.
//!
//! Signatures are part of the on-chain ABI and must not change.

use alloy_sol_types::sol;

// ERC-20 token interface
sol! {
	#[derive(Debug, PartialEq, Eq)]
	interface IERC20 {
		function approve(address spender, uint256 value) external returns (bool);
		function balanceOf(address owner) external view returns (uint256);
	}
}

// Curve-style pool interface (coins addressed by int128 index)
sol! {
	#[derive(Debug, PartialEq, Eq)]
	interface ICurvePool {
		function get_dy(int128 i, int128 j, uint256 dx) external view returns (uint256);
		function exchange(int128 i, int128 j, uint256 _dx, uint256 _min_dy, address _receiver) external returns (uint256);
	}
}

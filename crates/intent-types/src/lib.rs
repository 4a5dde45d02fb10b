//! Common types module for the bridge-and-swap intent crates.
//!
//! This module defines the primitives shared by the calldata builder, the
//! read-only chain client and the planner binary: token amounts, pool indices,
//! slippage tolerances, encoded calls and the network configuration they are
//! evaluated against.

/// Contract interfaces for token approval and pool exchange.
pub mod abi;
/// Calldata primitives and the calldata error taxonomy.
pub mod calldata;
/// Network and token configuration types.
pub mod networks;
/// Provider utilities for creating Alloy providers.
pub mod provider;
/// Utility functions for parsing and formatting.
pub mod utils;

pub use abi::{ICurvePool, IERC20};
pub use alloy_primitives::{Address, Bytes, U256};
pub use calldata::{
	Amount, CalldataError, EncodedCall, PoolIndex, SlippageBps, BPS_DENOMINATOR,
	DEFAULT_SLIPPAGE_BPS,
};
pub use networks::{NetworkConfig, NetworksConfig, RpcEndpoint, TokenConfig};
pub use provider::{create_http_provider, ProviderError};
pub use utils::{format_token_amount, parse_address, parse_amount};

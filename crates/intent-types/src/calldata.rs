//! Calldata primitives for approval and pool-exchange encoding.
//!
//! Amounts are raw smallest-unit token quantities with no decimal scaling.
//! Pool indices and slippage tolerances validate on construction, so a value
//! of either type that exists is always safe to hand to an encoder.

use alloy_primitives::{hex, Bytes, U256};
use alloy_sol_types::SolCall;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Token quantity in its smallest unit.
pub type Amount = U256;

/// Denominator of basis-point arithmetic (100%).
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Slippage tolerance applied when none is configured (0.03%).
pub const DEFAULT_SLIPPAGE_BPS: u16 = 3;

/// Errors raised while building calldata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalldataError {
	/// An input was rejected before any I/O took place.
	#[error("Invalid parameter: {0}")]
	InvalidParameter(String),
	/// The on-chain quote could not be obtained or decoded.
	#[error("Quote unavailable: {0}")]
	QuoteUnavailable(String),
}

/// Position of a coin inside a pool's coin array.
///
/// Encoded as `int128` on-chain. Negative positions do not exist in any pool
/// and are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolIndex(i128);

impl PoolIndex {
	/// Creates a pool index, rejecting negative positions.
	pub fn new(index: i128) -> Result<Self, CalldataError> {
		if index < 0 {
			return Err(CalldataError::InvalidParameter(format!(
				"Pool index must be non-negative, got {}",
				index
			)));
		}
		Ok(Self(index))
	}

	/// Returns the raw `int128` value.
	pub fn get(self) -> i128 {
		self.0
	}
}

impl TryFrom<i64> for PoolIndex {
	type Error = CalldataError;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		Self::new(i128::from(value))
	}
}

impl From<PoolIndex> for i128 {
	fn from(index: PoolIndex) -> Self {
		index.0
	}
}

impl fmt::Display for PoolIndex {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Slippage tolerance in basis points, always within `[0, 10000)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SlippageBps(u16);

impl SlippageBps {
	/// Creates a tolerance, rejecting values of 100% or more.
	pub fn new(bps: u16) -> Result<Self, CalldataError> {
		if bps >= BPS_DENOMINATOR {
			return Err(CalldataError::InvalidParameter(format!(
				"Slippage must be below {} bps, got {}",
				BPS_DENOMINATOR, bps
			)));
		}
		Ok(Self(bps))
	}

	/// Returns the tolerance in basis points.
	pub fn get(self) -> u16 {
		self.0
	}

	/// Share of the quote that is kept, in basis points (`10000 - bps`).
	pub fn retained_bps(self) -> u16 {
		BPS_DENOMINATOR - self.0
	}
}

impl Default for SlippageBps {
	fn default() -> Self {
		Self(DEFAULT_SLIPPAGE_BPS)
	}
}

impl TryFrom<u16> for SlippageBps {
	type Error = CalldataError;

	fn try_from(value: u16) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<SlippageBps> for u16 {
	fn from(bps: SlippageBps) -> Self {
		bps.0
	}
}

impl fmt::Display for SlippageBps {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} bps", self.0)
	}
}

/// An ABI-encoded function invocation: 4-byte selector followed by arguments.
///
/// Immutable once produced; only encoders create new values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedCall(Bytes);

impl EncodedCall {
	/// Encodes a typed contract call.
	pub fn from_call<C: SolCall>(call: &C) -> Self {
		Self(Bytes::from(call.abi_encode()))
	}

	/// Returns the raw calldata.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Returns the 4-byte function selector, if present.
	pub fn selector(&self) -> Option<[u8; 4]> {
		self.0.get(..4).and_then(|s| s.try_into().ok())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for EncodedCall {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&hex::encode_prefixed(&self.0))
	}
}

impl Serialize for EncodedCall {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for EncodedCall {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Bytes::deserialize(deserializer).map(Self)
	}
}

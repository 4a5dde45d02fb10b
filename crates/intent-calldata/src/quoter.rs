//! On-chain output quotes for pool exchanges.
//!
//! A quote is always read fresh from the pool's `get_dy` view. Nothing is
//! cached between calls: the minimum output of an exchange is only as good as
//! the quote it was derived from, and a quote taken for a different input
//! amount says nothing about the current one.

use alloy_primitives::Bytes;
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use intent_delivery::ChainReadInterface;
use intent_types::{Address, Amount, CalldataError, ICurvePool, PoolIndex};
use std::sync::Arc;
use std::time::Duration;

/// Per-call deadline applied by [`CurvePoolQuoter`] unless configured otherwise.
pub const DEFAULT_QUOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of expected exchange outputs.
///
/// Every failure, whatever its cause, is reported as
/// `CalldataError::QuoteUnavailable`. Implementations do not retry.
#[async_trait]
pub trait MinOutputQuoter: Send + Sync {
	/// Returns the pool's expected output for swapping `dx` of coin `i` into coin `j`.
	async fn get_dy(
		&self,
		pool: Address,
		i: PoolIndex,
		j: PoolIndex,
		dx: Amount,
	) -> Result<Amount, CalldataError>;
}

/// Quotes curve-style pools through a read-only chain client.
pub struct CurvePoolQuoter {
	reader: Arc<dyn ChainReadInterface>,
	chain_id: u64,
	timeout: Duration,
}

impl CurvePoolQuoter {
	/// Creates a quoter for pools on `chain_id` with the default timeout.
	pub fn new(reader: Arc<dyn ChainReadInterface>, chain_id: u64) -> Self {
		Self {
			reader,
			chain_id,
			timeout: DEFAULT_QUOTE_TIMEOUT,
		}
	}

	/// Overrides the per-call deadline.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn chain_id(&self) -> u64 {
		self.chain_id
	}
}

impl std::fmt::Debug for CurvePoolQuoter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CurvePoolQuoter")
			.field("chain_id", &self.chain_id)
			.field("timeout", &self.timeout)
			.finish()
	}
}

#[async_trait]
impl MinOutputQuoter for CurvePoolQuoter {
	async fn get_dy(
		&self,
		pool: Address,
		i: PoolIndex,
		j: PoolIndex,
		dx: Amount,
	) -> Result<Amount, CalldataError> {
		let call = ICurvePool::get_dyCall {
			i: i.get(),
			j: j.get(),
			dx,
		};
		let calldata = Bytes::from(call.abi_encode());

		let response = tokio::time::timeout(
			self.timeout,
			self.reader.call(self.chain_id, pool, calldata),
		)
		.await;

		let raw = match response {
			Ok(Ok(raw)) => raw,
			Ok(Err(e)) => {
				tracing::warn!(
					chain_id = self.chain_id,
					pool = %pool,
					i = %i,
					j = %j,
					dx = %dx,
					error = %e,
					"get_dy call failed"
				);
				return Err(CalldataError::QuoteUnavailable(format!(
					"get_dy on pool {} failed: {}",
					pool, e
				)));
			},
			Err(_) => {
				tracing::warn!(
					chain_id = self.chain_id,
					pool = %pool,
					timeout_ms = self.timeout.as_millis() as u64,
					"get_dy call timed out"
				);
				return Err(CalldataError::QuoteUnavailable(format!(
					"get_dy on pool {} timed out after {:?}",
					pool, self.timeout
				)));
			},
		};

		// A pool address without code returns empty data rather than an error
		let dy = ICurvePool::get_dyCall::abi_decode_returns(&raw).map_err(|e| {
			CalldataError::QuoteUnavailable(format!(
				"Malformed get_dy response from pool {} ({} bytes): {}",
				pool,
				raw.len(),
				e
			))
		})?;

		tracing::debug!(
			chain_id = self.chain_id,
			pool = %pool,
			dx = %dx,
			dy = %dy,
			"Quoted exchange output"
		);

		Ok(dy)
	}
}

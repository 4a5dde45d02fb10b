//! Pool exchange encoding.
//!
//! Building an exchange call is quote -> slippage -> encode. Parameters are
//! validated before the quote is requested, and a failed quote produces no
//! calldata at all.

use crate::quoter::MinOutputQuoter;
use crate::slippage::min_output;
use intent_types::{Address, Amount, CalldataError, EncodedCall, ICurvePool, PoolIndex, SlippageBps};

/// Static description of a pool exchange; the input amount is supplied per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeParams {
	/// Pool contract the exchange is sent to.
	pub pool: Address,
	/// Index of the coin sold.
	pub i: PoolIndex,
	/// Index of the coin bought.
	pub j: PoolIndex,
	/// Recipient of the bought coin.
	pub receiver: Address,
	/// Tolerance applied to the quoted output.
	pub slippage: SlippageBps,
}

impl ExchangeParams {
	/// Creates exchange parameters with the default slippage tolerance.
	pub fn new(
		pool: Address,
		i: PoolIndex,
		j: PoolIndex,
		receiver: Address,
	) -> Result<Self, CalldataError> {
		let params = Self {
			pool,
			i,
			j,
			receiver,
			slippage: SlippageBps::default(),
		};
		params.validate()?;
		Ok(params)
	}

	pub fn with_slippage(mut self, slippage: SlippageBps) -> Self {
		self.slippage = slippage;
		self
	}

	/// Checks invariants that the field types alone cannot express.
	pub fn validate(&self) -> Result<(), CalldataError> {
		if self.i == self.j {
			return Err(CalldataError::InvalidParameter(format!(
				"Exchange must swap between different coins, got i = j = {}",
				self.i
			)));
		}
		if self.pool == Address::ZERO {
			return Err(CalldataError::InvalidParameter(
				"Pool address cannot be the zero address".to_string(),
			));
		}
		if self.receiver == Address::ZERO {
			return Err(CalldataError::InvalidParameter(
				"Receiver cannot be the zero address".to_string(),
			));
		}
		Ok(())
	}
}

/// An exchange call together with the figures it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedExchange {
	/// Input amount the call sells.
	pub dx: Amount,
	/// Output the pool quoted for `dx`.
	pub quoted_dy: Amount,
	/// Minimum output written into the call.
	pub min_dy: Amount,
	/// Encoded `exchange(i, j, dx, min_dy, receiver)`.
	pub call: EncodedCall,
}

/// Quotes `dx` against the pool and encodes the exchange.
///
/// Each invocation issues its own quote; calling again with a new `dx`
/// re-derives the minimum output from scratch.
pub async fn quote_exchange(
	quoter: &dyn MinOutputQuoter,
	params: &ExchangeParams,
	dx: Amount,
) -> Result<QuotedExchange, CalldataError> {
	params.validate()?;

	let quoted_dy = quoter.get_dy(params.pool, params.i, params.j, dx).await?;
	let min_dy = min_output(quoted_dy, params.slippage);

	let call = EncodedCall::from_call(&ICurvePool::exchangeCall {
		i: params.i.get(),
		j: params.j.get(),
		_dx: dx,
		_min_dy: min_dy,
		_receiver: params.receiver,
	});

	tracing::debug!(
		pool = %params.pool,
		dx = %dx,
		quoted_dy = %quoted_dy,
		min_dy = %min_dy,
		slippage = %params.slippage,
		"Encoded exchange call"
	);

	Ok(QuotedExchange {
		dx,
		quoted_dy,
		min_dy,
		call,
	})
}

/// Builds `exchange(i, j, dx, min_dy, receiver)` calldata with the default
/// slippage tolerance.
pub async fn build_exchange_call(
	quoter: &dyn MinOutputQuoter,
	pool: Address,
	i: PoolIndex,
	j: PoolIndex,
	dx: Amount,
	receiver: Address,
) -> Result<EncodedCall, CalldataError> {
	let params = ExchangeParams::new(pool, i, j, receiver)?;
	quote_exchange(quoter, &params, dx)
		.await
		.map(|quoted| quoted.call)
}

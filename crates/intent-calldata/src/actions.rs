//! Destination-chain actions carried by a bridge message.
//!
//! When the bridge reveals the amount that actually arrived, every action is
//! re-encoded against that amount. Each action kind knows how to do this for
//! itself through `recompute`.

use crate::approval::encode_approval;
use crate::exchange::{quote_exchange, ExchangeParams, QuotedExchange};
use crate::quoter::MinOutputQuoter;
use intent_types::{Address, Amount, CalldataError, EncodedCall, U256};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single call the bridge executes on the destination chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
	/// Contract the call is sent to.
	pub target: Address,
	/// Encoded invocation.
	pub call_data: EncodedCall,
	/// Native value attached to the call.
	pub value: U256,
}

/// Approval of `spender` on the bridged token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalAction {
	/// Token being approved (the bridged stablecoin on the destination chain).
	pub token: Address,
	/// Contract allowed to pull the token.
	pub spender: Address,
}

impl ApprovalAction {
	pub fn recompute(&self, amount: Amount) -> EncodedCall {
		encode_approval(self.spender, amount)
	}
}

/// Pool exchange selling the bridged token.
#[derive(Clone)]
pub struct ExchangeAction {
	pub params: ExchangeParams,
	quoter: Arc<dyn MinOutputQuoter>,
}

impl ExchangeAction {
	pub fn new(params: ExchangeParams, quoter: Arc<dyn MinOutputQuoter>) -> Self {
		Self { params, quoter }
	}

	/// Re-quotes and re-encodes the exchange for `amount`.
	pub async fn quote(&self, amount: Amount) -> Result<QuotedExchange, CalldataError> {
		quote_exchange(self.quoter.as_ref(), &self.params, amount).await
	}

	pub async fn recompute(&self, amount: Amount) -> Result<EncodedCall, CalldataError> {
		self.quote(amount).await.map(|quoted| quoted.call)
	}
}

impl std::fmt::Debug for ExchangeAction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ExchangeAction")
			.field("params", &self.params)
			.finish()
	}
}

/// An action whose calldata depends on the bridged amount.
#[derive(Debug, Clone)]
pub enum BridgeAction {
	Approval(ApprovalAction),
	Exchange(ExchangeAction),
}

impl BridgeAction {
	/// Contract the action's call is sent to.
	pub fn target(&self) -> Address {
		match self {
			BridgeAction::Approval(action) => action.token,
			BridgeAction::Exchange(action) => action.params.pool,
		}
	}

	/// Native value attached to the call; both kinds move tokens only.
	pub fn value(&self) -> U256 {
		U256::ZERO
	}

	pub fn kind(&self) -> &'static str {
		match self {
			BridgeAction::Approval(_) => "approve",
			BridgeAction::Exchange(_) => "exchange",
		}
	}

	/// Re-encodes the action for a newly revealed amount.
	pub async fn recompute(&self, amount: Amount) -> Result<EncodedCall, CalldataError> {
		match self {
			BridgeAction::Approval(action) => Ok(action.recompute(amount)),
			BridgeAction::Exchange(action) => action.recompute(amount).await,
		}
	}

	/// Re-encodes the action and wraps it for the bridge message, keeping the
	/// quote an exchange was derived from.
	pub async fn encode(&self, amount: Amount) -> Result<EncodedAction, CalldataError> {
		let (call_data, quote) = match self {
			BridgeAction::Exchange(action) => {
				let quoted = action.quote(amount).await?;
				(quoted.call.clone(), Some(quoted))
			},
			_ => (self.recompute(amount).await?, None),
		};

		Ok(EncodedAction {
			payload: ActionPayload {
				target: self.target(),
				call_data,
				value: self.value(),
			},
			quote,
		})
	}
}

/// One action encoded for a given amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAction {
	pub payload: ActionPayload,
	/// Present for exchanges only.
	pub quote: Option<QuotedExchange>,
}

/// A whole plan encoded for one amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPlan {
	pub amount: Amount,
	pub payloads: Vec<ActionPayload>,
	/// Quotes behind the plan's exchanges, in action order.
	pub quotes: Vec<QuotedExchange>,
}

/// The ordered destination actions of one intent.
#[derive(Debug, Clone)]
pub struct ActionPlan {
	actions: Vec<BridgeAction>,
}

impl ActionPlan {
	pub fn new(actions: Vec<BridgeAction>) -> Self {
		Self { actions }
	}

	/// Approve the pool on `token`, then swap through it.
	pub fn approve_and_exchange(
		token: Address,
		params: ExchangeParams,
		quoter: Arc<dyn MinOutputQuoter>,
	) -> Result<Self, CalldataError> {
		params.validate()?;
		Ok(Self::new(vec![
			BridgeAction::Approval(ApprovalAction {
				token,
				spender: params.pool,
			}),
			BridgeAction::Exchange(ExchangeAction::new(params, quoter)),
		]))
	}

	pub fn actions(&self) -> &[BridgeAction] {
		&self.actions
	}

	/// Encodes every action for one amount, in order.
	///
	/// Stops at the first failure; no partial plan is returned.
	pub async fn encode_all(&self, amount: Amount) -> Result<EncodedPlan, CalldataError> {
		let mut payloads = Vec::with_capacity(self.actions.len());
		let mut quotes = Vec::new();

		for action in &self.actions {
			let encoded = action.encode(amount).await?;
			tracing::debug!(
				kind = action.kind(),
				target = %encoded.payload.target,
				amount = %amount,
				"Recomputed action"
			);
			payloads.push(encoded.payload);
			quotes.extend(encoded.quote);
		}

		Ok(EncodedPlan {
			amount,
			payloads,
			quotes,
		})
	}

	/// Re-encodes every action for one settled amount, in order.
	pub async fn recompute_all(&self, amount: Amount) -> Result<Vec<ActionPayload>, CalldataError> {
		self.encode_all(amount).await.map(|plan| plan.payloads)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::exchange::tests::{idx, StubQuoter, POOL, RECEIVER};
	use alloy_primitives::address;
	use alloy_sol_types::SolCall;
	use intent_types::{ICurvePool, IERC20};

	const USDC: Address = address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913");

	fn plan(quoter: Arc<StubQuoter>) -> ActionPlan {
		let params = ExchangeParams::new(POOL, idx(1), idx(0), RECEIVER).unwrap();
		ActionPlan::approve_and_exchange(USDC, params, quoter).unwrap()
	}

	#[tokio::test]
	async fn test_recompute_all_uses_settled_amount() {
		let quoter = Arc::new(StubQuoter::returning(99_000_000));
		let plan = plan(quoter.clone());

		let payloads = plan.recompute_all(U256::from(100_000_000u64)).await.unwrap();
		assert_eq!(payloads.len(), 2);

		assert_eq!(payloads[0].target, USDC);
		assert_eq!(payloads[0].value, U256::ZERO);
		let approve = IERC20::approveCall::abi_decode(payloads[0].call_data.as_bytes()).unwrap();
		assert_eq!(approve.spender, POOL);
		assert_eq!(approve.value, U256::from(100_000_000u64));

		assert_eq!(payloads[1].target, POOL);
		let exchange =
			ICurvePool::exchangeCall::abi_decode(payloads[1].call_data.as_bytes()).unwrap();
		assert_eq!(exchange._dx, U256::from(100_000_000u64));
		assert_eq!(exchange._min_dy, U256::from(98_970_300u64));
		assert_eq!(exchange._receiver, RECEIVER);
	}

	#[tokio::test]
	async fn test_provisional_then_final_amount() {
		let quoter = Arc::new(StubQuoter::returning(99_000_000));
		let plan = plan(quoter.clone());

		let provisional = plan.recompute_all(U256::from(100_000_000u64)).await.unwrap();
		let settled = plan.recompute_all(U256::from(99_950_000u64)).await.unwrap();

		assert_ne!(provisional, settled);
		// One fresh quote per recomputation
		assert_eq!(quoter.query_count(), 2);

		let approve = IERC20::approveCall::abi_decode(settled[0].call_data.as_bytes()).unwrap();
		assert_eq!(approve.value, U256::from(99_950_000u64));
	}

	#[tokio::test]
	async fn test_encode_all_keeps_exchange_quote() {
		let quoter = Arc::new(StubQuoter::returning(99_000_000));
		let plan = plan(quoter.clone());
		let amount = U256::from(100_000_000u64);

		let encoded = plan.encode_all(amount).await.unwrap();
		assert_eq!(encoded.amount, amount);
		assert_eq!(encoded.payloads.len(), 2);
		assert_eq!(encoded.quotes.len(), 1);

		let quote = &encoded.quotes[0];
		assert_eq!(quote.dx, amount);
		assert_eq!(quote.quoted_dy, U256::from(99_000_000u64));
		assert_eq!(quote.min_dy, U256::from(98_970_300u64));
		// The exchange payload carries exactly the quoted call
		assert_eq!(encoded.payloads[1].call_data, quote.call);
		assert_eq!(quoter.query_count(), 1);
	}

	#[tokio::test]
	async fn test_approval_encodes_without_quote() {
		let quoter = Arc::new(StubQuoter::failing());
		let plan = plan(quoter.clone());

		let encoded = plan.actions()[0].encode(U256::from(7u64)).await.unwrap();
		assert!(encoded.quote.is_none());
		assert_eq!(encoded.payload.target, USDC);
		assert_eq!(quoter.query_count(), 0);
	}

	#[tokio::test]
	async fn test_failed_quote_aborts_plan() {
		let quoter = Arc::new(StubQuoter::failing());
		let plan = plan(quoter);

		let result = plan.recompute_all(U256::from(100_000_000u64)).await;
		assert!(matches!(result, Err(CalldataError::QuoteUnavailable(_))));
	}

	#[tokio::test]
	async fn test_approval_needs_no_quote() {
		let quoter = Arc::new(StubQuoter::failing());
		let plan = plan(quoter.clone());

		let approval = &plan.actions()[0];
		assert_eq!(approval.kind(), "approve");
		assert!(approval.recompute(U256::from(5u64)).await.is_ok());
		assert_eq!(quoter.query_count(), 0);
	}

	#[test]
	fn test_payload_serializes_as_hex() {
		let payload = ActionPayload {
			target: USDC,
			call_data: encode_approval(POOL, U256::from(1u64)),
			value: U256::ZERO,
		};

		let json = serde_json::to_value(&payload).unwrap();
		assert_eq!(
			json["target"].as_str().unwrap().to_lowercase(),
			"0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"
		);
		assert!(json["callData"].as_str().unwrap().starts_with("0x095ea7b3"));

		let back: ActionPayload = serde_json::from_value(json).unwrap();
		assert_eq!(back, payload);
	}
}

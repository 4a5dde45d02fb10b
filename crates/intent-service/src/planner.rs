//! Plans the destination-chain actions of one bridge-and-swap intent.
//!
//! The planner checks that the sender can fund the route, builds the
//! approve-then-exchange action plan and renders it for the provisional
//! amount and, when known, for the amount the bridge actually delivered.
//! Nothing is signed or submitted.

use intent_calldata::{ActionPayload, ActionPlan, CurvePoolQuoter, ExchangeParams};
use intent_config::{Config, ConfigError};
use intent_delivery::{ChainReadInterface, DeliveryError};
use intent_types::{format_token_amount, Address, Amount, CalldataError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while planning.
#[derive(Debug, Error)]
pub enum PlannerError {
	#[error("Config error: {0}")]
	Config(#[from] ConfigError),
	#[error("Delivery error: {0}")]
	Delivery(#[from] DeliveryError),
	#[error("Calldata error: {0}")]
	Calldata(#[from] CalldataError),
	#[error("Insufficient balance: sender holds {available}, route needs {required}")]
	InsufficientBalance { required: Amount, available: Amount },
}

/// Per-run options coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
	/// Amount revealed by the bridge; renders a second, settled stage.
	pub bridged_amount: Option<Amount>,
	/// Skips the origin-chain balance read.
	pub skip_balance_check: bool,
	/// Replaces `[swap].receiver` for this run.
	pub receiver: Option<Address>,
}

/// Quote behind an exchange action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageQuote {
	pub quoted_dy: String,
	pub min_dy: String,
}

/// Actions encoded for one amount.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStage {
	pub label: &'static str,
	pub amount: String,
	pub quote: Option<StageQuote>,
	pub actions: Vec<ActionPayload>,
}

/// Everything the planner produced for one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
	pub origin_chain_id: u64,
	pub destination_chain_id: u64,
	pub sender: Address,
	pub input_token: Address,
	pub output_token: Address,
	pub pool: Address,
	pub slippage_bps: u16,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender_balance: Option<String>,
	pub stages: Vec<PlanStage>,
}

/// Drives the calldata builder for a validated configuration.
pub struct Planner {
	config: Config,
	reader: Arc<dyn ChainReadInterface>,
}

impl Planner {
	pub fn new(config: Config, reader: Arc<dyn ChainReadInterface>) -> Self {
		Self { config, reader }
	}

	/// Reads the sender's input-token balance on the origin chain.
	///
	/// Fails with `InsufficientBalance` when it cannot cover the route amount.
	pub async fn check_balance(&self) -> Result<Amount, PlannerError> {
		let route = &self.config.route;
		let available = self
			.reader
			.token_balance(route.origin_chain_id, route.input_token, route.sender)
			.await?;

		if available < route.amount {
			tracing::warn!(
				chain_id = route.origin_chain_id,
				sender = %route.sender,
				available = %available,
				required = %route.amount,
				"Sender cannot fund the route"
			);
			return Err(PlannerError::InsufficientBalance {
				required: route.amount,
				available,
			});
		}

		Ok(available)
	}

	/// Exchange parameters derived from the `[swap]` section.
	pub fn exchange_params(
		&self,
		receiver: Option<Address>,
	) -> Result<ExchangeParams, PlannerError> {
		let swap = &self.config.swap;
		let (i, j) = swap.indices()?;
		let receiver = receiver.unwrap_or(swap.receiver);
		let params = ExchangeParams::new(swap.pool, i, j, receiver)?;
		Ok(params.with_slippage(swap.slippage_bps))
	}

	/// Approve-then-exchange plan quoting against the destination chain.
	pub fn action_plan(&self, receiver: Option<Address>) -> Result<ActionPlan, PlannerError> {
		let route = &self.config.route;
		let quoter = CurvePoolQuoter::new(self.reader.clone(), route.destination_chain_id)
			.with_timeout(self.config.swap.quote_timeout());

		Ok(ActionPlan::approve_and_exchange(
			route.output_token,
			self.exchange_params(receiver)?,
			Arc::new(quoter),
		)?)
	}

	/// Runs the full planning flow.
	pub async fn plan(&self, options: &PlanOptions) -> Result<PlanReport, PlannerError> {
		let route = &self.config.route;

		let sender_balance = if options.skip_balance_check {
			tracing::warn!("Skipping origin balance check");
			None
		} else {
			let balance = self.check_balance().await?;
			Some(self.format_origin_amount(balance))
		};

		let plan = self.action_plan(options.receiver)?;

		let mut stages = vec![render_stage(&plan, "provisional", route.amount).await?];
		tracing::info!(amount = %route.amount, "Encoded provisional actions");

		if let Some(bridged) = options.bridged_amount {
			stages.push(render_stage(&plan, "settled", bridged).await?);
			tracing::info!(amount = %bridged, "Re-encoded actions for bridged amount");
		}

		Ok(PlanReport {
			origin_chain_id: route.origin_chain_id,
			destination_chain_id: route.destination_chain_id,
			sender: route.sender,
			input_token: route.input_token,
			output_token: route.output_token,
			pool: self.config.swap.pool,
			slippage_bps: self.config.swap.slippage_bps.get(),
			sender_balance,
			stages,
		})
	}

	fn format_origin_amount(&self, amount: Amount) -> String {
		let route = &self.config.route;
		self.config
			.networks
			.get(&route.origin_chain_id)
			.and_then(|network| network.token(&route.input_token))
			.map(|token| format!("{} {}", format_token_amount(amount, token.decimals), token.symbol))
			.unwrap_or_else(|| amount.to_string())
	}
}

async fn render_stage(
	plan: &ActionPlan,
	label: &'static str,
	amount: Amount,
) -> Result<PlanStage, CalldataError> {
	let encoded = plan.encode_all(amount).await?;

	Ok(PlanStage {
		label,
		amount: encoded.amount.to_string(),
		quote: encoded.quotes.first().map(|quoted| StageQuote {
			quoted_dy: quoted.quoted_dy.to_string(),
			min_dy: quoted.min_dy.to_string(),
		}),
		actions: encoded.payloads,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_sol_types::SolCall;
	use intent_delivery::MockChainReadInterface;
	use intent_types::{Bytes, ICurvePool, IERC20, U256};

	const CONFIG: &str = r#"
[networks.1]
rpc_urls = [{ http = "https://eth.example" }]
tokens = [
	{ address = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", symbol = "USDC", decimals = 6 },
]

[networks.8453]
rpc_urls = [{ http = "https://base.example" }]

[route]
origin_chain_id = 1
destination_chain_id = 8453
input_token = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
output_token = "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"
sender = "0x1111111111111111111111111111111111111111"
amount = "100000000"

[swap]
pool = "0x4dece678ceceb27446b35c672dc7d61f30bad69e"
i = 1
j = 0
receiver = "0x1111111111111111111111111111111111111111"
"#;

	/// Pool quoting 99% of whatever is sold.
	fn quoting_reader(mock: &mut MockChainReadInterface) {
		mock.expect_call().returning(|chain_id, _, data| {
			assert_eq!(chain_id, 8453);
			let call = ICurvePool::get_dyCall::abi_decode(&data).unwrap();
			let dy = call.dx * U256::from(99u64) / U256::from(100u64);
			Box::pin(async move { Ok(Bytes::from(dy.to_be_bytes::<32>().to_vec())) })
		});
	}

	fn planner(mock: MockChainReadInterface) -> Planner {
		Planner::new(CONFIG.parse().unwrap(), Arc::new(mock))
	}

	#[tokio::test]
	async fn test_plan_provisional_stage() {
		let mut mock = MockChainReadInterface::new();
		mock.expect_token_balance()
			.times(1)
			.returning(|_, _, _| Box::pin(async { Ok(U256::from(250_000_000u64)) }));
		quoting_reader(&mut mock);

		let report = planner(mock).plan(&PlanOptions::default()).await.unwrap();
		assert_eq!(report.sender_balance.as_deref(), Some("250 USDC"));
		assert_eq!(report.stages.len(), 1);

		let stage = &report.stages[0];
		assert_eq!(stage.label, "provisional");
		assert_eq!(
			stage.quote,
			Some(StageQuote {
				quoted_dy: "99000000".to_string(),
				min_dy: "98970300".to_string(),
			})
		);

		let approval = &stage.actions[0];
		assert_eq!(approval.target, report.output_token);
		let approve = IERC20::approveCall::abi_decode(approval.call_data.as_bytes()).unwrap();
		assert_eq!(approve.spender, report.pool);
		assert_eq!(approve.value, U256::from(100_000_000u64));

		let exchange = &stage.actions[1];
		assert_eq!(exchange.target, report.pool);
		let decoded = ICurvePool::exchangeCall::abi_decode(exchange.call_data.as_bytes()).unwrap();
		assert_eq!(decoded.i, 1);
		assert_eq!(decoded.j, 0);
		assert_eq!(decoded._dx, U256::from(100_000_000u64));
		assert_eq!(decoded._min_dy, U256::from(98_970_300u64));
	}

	#[tokio::test]
	async fn test_plan_settled_stage_requotes() {
		let mut mock = MockChainReadInterface::new();
		mock.expect_token_balance().never();
		quoting_reader(&mut mock);

		let options = PlanOptions {
			bridged_amount: Some(U256::from(99_950_000u64)),
			skip_balance_check: true,
			..Default::default()
		};
		let report = planner(mock).plan(&options).await.unwrap();
		assert!(report.sender_balance.is_none());
		assert_eq!(report.stages.len(), 2);

		let settled = &report.stages[1];
		assert_eq!(settled.label, "settled");
		assert_eq!(settled.amount, "99950000");

		let approve =
			IERC20::approveCall::abi_decode(settled.actions[0].call_data.as_bytes()).unwrap();
		assert_eq!(approve.value, U256::from(99_950_000u64));

		let exchange =
			ICurvePool::exchangeCall::abi_decode(settled.actions[1].call_data.as_bytes()).unwrap();
		assert_eq!(exchange._dx, U256::from(99_950_000u64));
		// 99_950_000 * 0.99 = 98_950_500, minus 3 bps, floored
		assert_eq!(exchange._min_dy, U256::from(98_920_814u64));
	}

	#[tokio::test]
	async fn test_insufficient_balance_stops_before_quoting() {
		let mut mock = MockChainReadInterface::new();
		mock.expect_token_balance()
			.returning(|_, _, _| Box::pin(async { Ok(U256::from(1u64)) }));
		mock.expect_call().never();

		let result = planner(mock).plan(&PlanOptions::default()).await;
		assert!(matches!(
			result,
			Err(PlannerError::InsufficientBalance { .. })
		));
	}

	#[tokio::test]
	async fn test_quote_failure_aborts_plan() {
		let mut mock = MockChainReadInterface::new();
		mock.expect_call().returning(|_, _, _| {
			Box::pin(async { Err(DeliveryError::Network("connection refused".to_string())) })
		});

		let options = PlanOptions {
			skip_balance_check: true,
			..Default::default()
		};
		let result = planner(mock).plan(&options).await;
		assert!(matches!(
			result,
			Err(PlannerError::Calldata(CalldataError::QuoteUnavailable(_)))
		));
	}

	#[test]
	fn test_exchange_params_carry_slippage() {
		let config = CONFIG.replace("j = 0", "j = 0\nslippage_bps = 25");
		let planner = Planner::new(config.parse().unwrap(), Arc::new(MockChainReadInterface::new()));
		let params = planner.exchange_params(None).unwrap();
		assert_eq!(params.slippage.get(), 25);
		assert_eq!((params.i.get(), params.j.get()), (1, 0));
	}

	#[tokio::test]
	async fn test_receiver_override_reaches_exchange() {
		let mut mock = MockChainReadInterface::new();
		quoting_reader(&mut mock);
		let receiver = intent_types::parse_address("9B58B3CD1F1EC2E6B7E7F3A5A3BC4DDF0E0C8A11").unwrap();

		let options = PlanOptions {
			skip_balance_check: true,
			receiver: Some(receiver),
			..Default::default()
		};
		let report = planner(mock).plan(&options).await.unwrap();

		let exchange = ICurvePool::exchangeCall::abi_decode(
			report.stages[0].actions[1].call_data.as_bytes(),
		)
		.unwrap();
		assert_eq!(exchange._receiver, receiver);
	}

	#[test]
	fn test_zero_receiver_override_rejected() {
		let planner = planner(MockChainReadInterface::new());
		assert!(matches!(
			planner.exchange_params(Some(Address::ZERO)),
			Err(PlannerError::Calldata(CalldataError::InvalidParameter(_)))
		));
	}

	#[tokio::test]
	async fn test_report_serializes() {
		let mut mock = MockChainReadInterface::new();
		quoting_reader(&mut mock);
		let options = PlanOptions {
			skip_balance_check: true,
			..Default::default()
		};

		let report = planner(mock).plan(&options).await.unwrap();
		let json = serde_json::to_value(&report).unwrap();
		assert_eq!(json["destinationChainId"], 8453);
		assert_eq!(json["stages"][0]["quote"]["minDy"], "98970300");
		assert!(json["stages"][0]["actions"][1]["callData"]
			.as_str()
			.unwrap()
			.starts_with("0x"));
		assert!(json.get("senderBalance").is_none());
	}
}

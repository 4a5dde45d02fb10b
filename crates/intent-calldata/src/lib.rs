//! Calldata builder for the destination leg of a bridge-and-swap intent.
//!
//! After the bridged stablecoin lands on the destination chain, two calls run
//! on behalf of the intent: an ERC-20 approval of the pool and a pool exchange.
//! This crate encodes both. The exchange's minimum output is derived from a
//! fresh `get_dy` quote discounted by the configured slippage tolerance.
//!
//! Every encoder is a pure function of its inputs except the quote itself,
//! which is a single read-only chain call with no caching and no retry.

/// Recomputable destination actions.
pub mod actions;
/// ERC-20 approval encoding.
pub mod approval;
/// Pool exchange encoding.
pub mod exchange;
/// On-chain output quotes.
pub mod quoter;
/// Slippage-adjusted minimum output.
pub mod slippage;

pub use actions::{
	ActionPayload, ActionPlan, ApprovalAction, BridgeAction, EncodedAction, EncodedPlan,
	ExchangeAction,
};
pub use approval::encode_approval;
pub use exchange::{build_exchange_call, quote_exchange, ExchangeParams, QuotedExchange};
pub use quoter::{CurvePoolQuoter, MinOutputQuoter, DEFAULT_QUOTE_TIMEOUT};
pub use slippage::{apply_slippage, min_output};

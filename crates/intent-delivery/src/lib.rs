//! Read-only chain access for the intent crates.
//!
//! The calldata builder only ever needs to read from a chain: a pool quote on
//! the destination chain and a token balance on the origin chain. This crate
//! exposes that narrow capability as a trait so that the builder never depends
//! on a full provider, and ships an Alloy-backed implementation of it.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

pub use implementations::evm::alloy::AlloyChainReader;

/// Errors that can occur while reading chain state.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The node answered, but the payload could not be decoded.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
	/// No provider is configured for the requested chain.
	#[error("No implementation available for chain {0}")]
	NoImplementationAvailable(u64),
}

/// Trait defining the read-only chain operations the intent crates rely on.
///
/// Implementations must not submit transactions or mutate chain state.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait ChainReadInterface: Send + Sync {
	/// Executes a contract call without sending a transaction.
	///
	/// Performs an `eth_call` against the latest block of `chain_id` and
	/// returns the raw return data.
	async fn call(&self, chain_id: u64, to: Address, data: Bytes) -> Result<Bytes, DeliveryError>;

	/// Gets the ERC-20 balance of `owner` for `token`.
	async fn token_balance(
		&self,
		chain_id: u64,
		token: Address,
		owner: Address,
	) -> Result<U256, DeliveryError>;
}

/// Calls a read-only contract function and decodes its typed result.
pub async fn read_contract<C>(
	reader: &dyn ChainReadInterface,
	chain_id: u64,
	to: Address,
	call: &C,
) -> Result<C::Return, DeliveryError>
where
	C: SolCall + Sync,
{
	let data = reader
		.call(chain_id, to, Bytes::from(call.abi_encode()))
		.await?;

	C::abi_decode_returns(&data).map_err(|e| {
		DeliveryError::InvalidResponse(format!(
			"Failed to decode {} return data ({} bytes): {}",
			C::SIGNATURE,
			data.len(),
			e
		))
	})
}

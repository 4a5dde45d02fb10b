//! Alloy-backed implementation of the read-only chain interface.
//!
//! One HTTP provider is kept per configured chain. Calls go straight to the
//! node without a retry layer.

use crate::{read_contract, ChainReadInterface, DeliveryError};
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::{DynProvider, Provider};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use intent_types::{create_http_provider, NetworksConfig, IERC20};
use std::collections::HashMap;

/// Alloy-based EVM chain reader.
///
/// Supports multiple networks with a single instance; the chain ID passed to
/// each call selects the provider.
pub struct AlloyChainReader {
	/// Alloy providers for each supported network.
	providers: HashMap<u64, DynProvider>,
}

impl AlloyChainReader {
	/// Creates a reader with an HTTP provider for every listed network.
	///
	/// Fails if any network is missing from the configuration or has no usable
	/// HTTP RPC URL.
	pub fn from_networks(
		network_ids: &[u64],
		networks: &NetworksConfig,
	) -> Result<Self, DeliveryError> {
		if network_ids.is_empty() {
			return Err(DeliveryError::Network(
				"At least one network_id must be specified".to_string(),
			));
		}

		let mut providers = HashMap::new();
		for &network_id in network_ids {
			let provider = create_http_provider(network_id, networks)
				.map_err(|e| DeliveryError::Network(e.to_string()))?;
			tracing::debug!(network_id, "Created read-only provider");
			providers.insert(network_id, provider);
		}

		Ok(Self { providers })
	}

	/// Gets the provider for a specific chain ID.
	fn get_provider(&self, chain_id: u64) -> Result<&DynProvider, DeliveryError> {
		self.providers
			.get(&chain_id)
			.ok_or(DeliveryError::NoImplementationAvailable(chain_id))
	}
}

#[async_trait]
impl ChainReadInterface for AlloyChainReader {
	async fn call(&self, chain_id: u64, to: Address, data: Bytes) -> Result<Bytes, DeliveryError> {
		let provider = self.get_provider(chain_id)?;

		let request = TransactionRequest::default().to(to).input(data.into());

		provider.call(request).await.map_err(|e| {
			DeliveryError::Network(format!(
				"Failed to execute eth_call on chain {} against {}: {}",
				chain_id, to, e
			))
		})
	}

	async fn token_balance(
		&self,
		chain_id: u64,
		token: Address,
		owner: Address,
	) -> Result<U256, DeliveryError> {
		let call = IERC20::balanceOfCall { owner };
		let balance = read_contract(self, chain_id, token, &call).await?;

		tracing::debug!(
			chain_id,
			token = %token,
			owner = %owner,
			balance = %balance,
			"Fetched token balance"
		);

		Ok(balance)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;
	use intent_types::{NetworkConfig, RpcEndpoint};

	fn networks(url: &str) -> NetworksConfig {
		let mut networks = HashMap::new();
		networks.insert(
			8453,
			NetworkConfig {
				name: Some("base".to_string()),
				rpc_urls: vec![RpcEndpoint {
					http: url.to_string(),
				}],
				tokens: vec![],
			},
		);
		networks
	}

	#[test]
	fn test_from_networks_requires_ids() {
		let result = AlloyChainReader::from_networks(&[], &networks("http://127.0.0.1:8545"));
		assert!(matches!(result, Err(DeliveryError::Network(_))));
	}

	#[test]
	fn test_from_networks_unknown_chain() {
		let result = AlloyChainReader::from_networks(&[1], &networks("http://127.0.0.1:8545"));
		assert!(matches!(result, Err(DeliveryError::Network(_))));
	}

	#[tokio::test]
	async fn test_call_unconfigured_chain() {
		let reader =
			AlloyChainReader::from_networks(&[8453], &networks("http://127.0.0.1:8545")).unwrap();
		let result = reader
			.call(
				1,
				address!("1111111111111111111111111111111111111111"),
				Bytes::new(),
			)
			.await;
		assert!(matches!(
			result,
			Err(DeliveryError::NoImplementationAvailable(1))
		));
	}

	#[tokio::test]
	async fn test_call_unreachable_node() {
		// Port 1 is never an RPC node, the connection is refused
		let reader =
			AlloyChainReader::from_networks(&[8453], &networks("http://127.0.0.1:1")).unwrap();
		let result = reader
			.call(
				8453,
				address!("1111111111111111111111111111111111111111"),
				Bytes::new(),
			)
			.await;
		assert!(matches!(result, Err(DeliveryError::Network(_))));
	}
}

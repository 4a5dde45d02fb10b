//! Network configuration types for the origin and destination chains.
//!
//! This module defines the per-chain settings the planner reads from its
//! configuration: RPC endpoints and the tokens it knows about on each chain.

use alloy_primitives::Address;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// An RPC endpoint of a network.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RpcEndpoint {
	pub http: String,
}

/// Configuration for a token on a specific network.
///
/// # Fields
///
/// * `address` - The on-chain address of the token contract
/// * `symbol` - The token symbol (e.g., "USDC", "crvUSD")
/// * `decimals` - The number of decimal places for the token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TokenConfig {
	pub address: Address,
	pub symbol: String,
	pub decimals: u8,
}

/// Configuration for a single blockchain network.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
	/// Human readable name used in logs.
	#[serde(default)]
	pub name: Option<String>,
	/// RPC endpoints, tried in declaration order.
	pub rpc_urls: Vec<RpcEndpoint>,
	/// Tokens known on this network.
	#[serde(default)]
	pub tokens: Vec<TokenConfig>,
}

impl NetworkConfig {
	/// Returns the first configured HTTP URL.
	pub fn get_http_url(&self) -> Option<&str> {
		self.rpc_urls.first().map(|endpoint| endpoint.http.as_str())
	}

	/// Looks up a configured token by its contract address.
	pub fn token(&self, address: &Address) -> Option<&TokenConfig> {
		self.tokens.iter().find(|t| &t.address == address)
	}
}

/// Networks configuration mapping chain IDs to their configurations.
pub type NetworksConfig = HashMap<u64, NetworkConfig>;

/// Deserializes network configurations keyed by chain ID.
///
/// TOML table keys are always strings, so chain IDs arrive as `"1"`, `"8453"`
/// and are parsed to `u64` here.
pub fn deserialize_networks<'de, D>(deserializer: D) -> Result<NetworksConfig, D::Error>
where
	D: Deserializer<'de>,
{
	let string_map: HashMap<String, NetworkConfig> = HashMap::deserialize(deserializer)?;
	let mut result = HashMap::new();

	for (key, value) in string_map {
		let chain_id = key
			.parse::<u64>()
			.map_err(|e| serde::de::Error::custom(format!("Invalid chain_id '{}': {}", key, e)))?;
		result.insert(chain_id, value);
	}

	Ok(result)
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[derive(Deserialize)]
	struct Wrapper {
		#[serde(deserialize_with = "deserialize_networks")]
		networks: NetworksConfig,
	}

	#[test]
	fn test_deserialize_networks_from_toml() {
		let raw = r#"
			[networks.8453]
			name = "base"
			rpc_urls = [{ http = "https://mainnet.base.org" }]
			tokens = [
				{ address = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913", symbol = "USDC", decimals = 6 },
			]

			[networks.1]
			rpc_urls = [{ http = "https://eth.example" }, { http = "https://eth-backup.example" }]
		"#;

		let wrapper: Wrapper = toml::from_str(raw).unwrap();
		assert_eq!(wrapper.networks.len(), 2);

		let base = &wrapper.networks[&8453];
		assert_eq!(base.get_http_url(), Some("https://mainnet.base.org"));
		let usdc = base
			.token(&address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913"))
			.unwrap();
		assert_eq!(usdc.symbol, "USDC");
		assert_eq!(usdc.decimals, 6);

		// Declaration order decides
		assert_eq!(
			wrapper.networks[&1].get_http_url(),
			Some("https://eth.example")
		);
	}

	#[test]
	fn test_invalid_chain_id_key() {
		let raw = r#"
			[networks.mainnet]
			rpc_urls = []
		"#;
		let result: Result<Wrapper, _> = toml::from_str(raw);
		assert!(result.is_err());
	}

	#[test]
	fn test_endpoint_requires_http_url() {
		let raw = r#"
			[networks.1]
			rpc_urls = [{ ws = "wss://eth.example" }]
		"#;
		assert!(toml::from_str::<Wrapper>(raw).is_err());
	}
}

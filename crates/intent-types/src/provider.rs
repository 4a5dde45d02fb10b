//! Read-only HTTP providers.
//!
//! One erased provider per chain, built from the first HTTP URL of that
//! chain's network entry. There is no retry layer.

use crate::NetworksConfig;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_client::RpcClient;
use thiserror::Error;

/// Errors that can occur during provider creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
	#[error("Network {0} not found in configuration")]
	UnknownNetwork(u64),
	#[error("No HTTP RPC URL configured for network {0}")]
	MissingUrl(u64),
	#[error("Invalid HTTP RPC URL for network {network_id}: {reason}")]
	InvalidUrl { network_id: u64, reason: String },
}

/// Creates an HTTP provider for `network_id`.
pub fn create_http_provider(
	network_id: u64,
	networks: &NetworksConfig,
) -> Result<DynProvider, ProviderError> {
	let http_url = networks
		.get(&network_id)
		.ok_or(ProviderError::UnknownNetwork(network_id))?
		.get_http_url()
		.ok_or(ProviderError::MissingUrl(network_id))?;

	let url = http_url.parse().map_err(|e| ProviderError::InvalidUrl {
		network_id,
		reason: format!("{e}"),
	})?;

	let client = RpcClient::builder().http(url);
	let provider = ProviderBuilder::new().connect_client(client);
	tracing::debug!(network_id, "Created HTTP provider");
	Ok(provider.erased())
}

//! Configuration for the bridge-and-swap planner.
//!
//! A single TOML file describes the networks the planner reads from, the
//! bridge route that delivers tokens to the destination chain, and the pool
//! swap performed once they arrive. `${VAR}` and `${VAR:-default}` references
//! are resolved from the environment before parsing.

use intent_types::{
	networks::deserialize_networks, parse_amount, Address, Amount, NetworksConfig, PoolIndex,
	SlippageBps,
};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message, drop the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level planner configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Network and token configurations.
	#[serde(deserialize_with = "deserialize_networks")]
	pub networks: NetworksConfig,
	/// The bridge leg that moves tokens to the destination chain.
	pub route: RouteConfig,
	/// The pool swap executed on the destination chain.
	pub swap: SwapConfig,
}

/// Bridge route description.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
	/// Chain the tokens leave from.
	pub origin_chain_id: u64,
	/// Chain the tokens arrive on and where the swap happens.
	pub destination_chain_id: u64,
	/// Token sent on the origin chain.
	pub input_token: Address,
	/// Token received on the destination chain; approved to the pool.
	pub output_token: Address,
	/// Account that owns the input tokens.
	pub sender: Address,
	/// Amount of `input_token` to bridge, as a decimal string of raw units.
	#[serde(
		deserialize_with = "deserialize_amount",
		serialize_with = "serialize_amount"
	)]
	pub amount: Amount,
}

/// Destination-chain swap description.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwapConfig {
	/// Pool contract exposing `get_dy` and `exchange`.
	pub pool: Address,
	/// Index of the coin sold.
	pub i: i64,
	/// Index of the coin bought.
	pub j: i64,
	/// Recipient of the bought coin.
	pub receiver: Address,
	/// Tolerated shortfall against the quote, in basis points.
	#[serde(default)]
	pub slippage_bps: SlippageBps,
	/// Upper bound on a single quote round trip.
	#[serde(default = "default_quote_timeout_seconds")]
	pub quote_timeout_seconds: u64,
}

impl SwapConfig {
	/// Returns the validated `(i, j)` pool indices.
	pub fn indices(&self) -> Result<(PoolIndex, PoolIndex), ConfigError> {
		let i = PoolIndex::try_from(self.i).map_err(|e| ConfigError::Validation(e.to_string()))?;
		let j = PoolIndex::try_from(self.j).map_err(|e| ConfigError::Validation(e.to_string()))?;
		Ok((i, j))
	}

	pub fn quote_timeout(&self) -> Duration {
		Duration::from_secs(self.quote_timeout_seconds)
	}
}

fn default_quote_timeout_seconds() -> u64 {
	10
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	parse_amount(&raw).map_err(serde::de::Error::custom)
}

fn serialize_amount<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&amount.to_string())
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = String::with_capacity(input.len());
	let mut last = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let var_name = var_name.as_str();

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match cap.get(2) {
				Some(default) => default.as_str().to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{var_name}' not found"
					)));
				},
			},
		};

		result.push_str(&input[last..full_match.start()]);
		result.push_str(&value);
		last = full_match.end();
	}
	result.push_str(&input[last..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file.
	///
	/// The file is read asynchronously, environment references are resolved,
	/// and the result is validated before it is returned.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = tokio::fs::read_to_string(path).await?;
		tracing::debug!(path = %path.display(), bytes = content.len(), "Loaded configuration file");
		content.parse()
	}

	/// Validates the configuration to ensure all required fields are properly set.
	///
	/// - Origin and destination chains are distinct and both configured
	/// - Every referenced network has an HTTP RPC URL
	/// - The bridged amount is non-zero
	/// - Pool indices are non-negative and distinct
	/// - Pool and receiver are non-zero addresses
	/// - The quote timeout is positive
	fn validate(&self) -> Result<(), ConfigError> {
		let route = &self.route;

		if route.origin_chain_id == route.destination_chain_id {
			return Err(ConfigError::Validation(format!(
				"Origin and destination chains must differ (both are {})",
				route.origin_chain_id
			)));
		}

		for chain_id in [route.origin_chain_id, route.destination_chain_id] {
			let network = self.networks.get(&chain_id).ok_or_else(|| {
				ConfigError::Validation(format!("Network {chain_id} is not configured"))
			})?;
			if network.get_http_url().is_none() {
				return Err(ConfigError::Validation(format!(
					"Network {chain_id} has no HTTP RPC URL"
				)));
			}
		}

		if route.amount.is_zero() {
			return Err(ConfigError::Validation(
				"Route amount must be greater than zero".into(),
			));
		}

		if route.sender == Address::ZERO {
			return Err(ConfigError::Validation(
				"Route sender cannot be the zero address".into(),
			));
		}

		let (i, j) = self.swap.indices()?;
		if i == j {
			return Err(ConfigError::Validation(format!(
				"Swap indices must differ (both are {i})"
			)));
		}

		if self.swap.pool == Address::ZERO {
			return Err(ConfigError::Validation(
				"Swap pool cannot be the zero address".into(),
			));
		}
		if self.swap.receiver == Address::ZERO {
			return Err(ConfigError::Validation(
				"Swap receiver cannot be the zero address".into(),
			));
		}

		if self.swap.quote_timeout_seconds == 0 {
			return Err(ConfigError::Validation(
				"quote_timeout_seconds must be greater than zero".into(),
			));
		}

		if let Some(network) = self.networks.get(&route.destination_chain_id) {
			if !network.tokens.is_empty() && network.token(&route.output_token).is_none() {
				tracing::warn!(
					chain_id = route.destination_chain_id,
					token = %route.output_token,
					"Output token is not listed in the destination network tokens"
				);
			}
		}

		Ok(())
	}
}

/// Parses and validates configuration from a TOML string.
///
/// Environment variables are resolved before parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

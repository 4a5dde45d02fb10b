//! Main entry point for the intent planner.
//!
//! Loads a planner configuration, checks that the sender can fund the bridge
//! route and prints the destination-chain actions (approve, then exchange)
//! as JSON. Nothing is signed or submitted.

use clap::Parser;
use intent_config::Config;
use intent_delivery::AlloyChainReader;
use intent_service::{PlanOptions, Planner};
use intent_types::{parse_address, parse_amount, Address, Amount};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line arguments for the planner.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to the planner configuration file
	#[arg(short, long, env = "INTENT_PLANNER_CONFIG")]
	config: PathBuf,

	/// Amount delivered by the bridge, in the output token's smallest unit
	///
	/// When set, every action is re-encoded for this amount after the
	/// provisional plan.
	#[arg(long, value_parser = parse_bridged_amount)]
	bridged_amount: Option<Amount>,

	/// Receiver of the bought coin, replacing `[swap].receiver`
	#[arg(long, value_parser = parse_receiver)]
	receiver: Option<Address>,

	/// Skip the origin-chain balance check
	#[arg(long, default_value = "false")]
	skip_balance_check: bool,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

fn parse_bridged_amount(value: &str) -> Result<Amount, String> {
	parse_amount(value).map_err(|e| e.to_string())
}

fn parse_receiver(value: &str) -> Result<Address, String> {
	parse_address(value).map_err(|e| e.to_string())
}

/// Main entry point for the planner.
///
/// 1. Parses command-line arguments
/// 2. Initializes logging on stderr
/// 3. Loads and validates configuration
/// 4. Connects read-only providers for the origin and destination chains
/// 5. Plans and prints the destination actions
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let _ = dotenvy::dotenv();
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.with_writer(std::io::stderr)
		.init();

	tracing::info!("Loading configuration from file: {:?}", args.config);
	let config = Config::from_file(&args.config).await?;

	let route = &config.route;
	let reader = AlloyChainReader::from_networks(
		&[route.origin_chain_id, route.destination_chain_id],
		&config.networks,
	)?;
	tracing::info!(
		origin = route.origin_chain_id,
		destination = route.destination_chain_id,
		"Connected chain readers"
	);

	let planner = Planner::new(config, Arc::new(reader));
	let options = PlanOptions {
		bridged_amount: args.bridged_amount,
		skip_balance_check: args.skip_balance_check,
		receiver: args.receiver,
	};

	let report = planner.plan(&options).await?;
	println!("{}", serde_json::to_string_pretty(&report)?);

	tracing::info!(stages = report.stages.len(), "Planned intent");
	Ok(())
}

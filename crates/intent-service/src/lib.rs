//! Planning service for bridge-and-swap intents.
//!
//! Wires the configuration, the read-only chain client and the calldata
//! builder together. The `intent-planner` binary is a thin CLI over
//! [`planner::Planner`].

pub mod planner;

pub use planner::{PlanOptions, PlanReport, PlanStage, Planner, PlannerError, StageQuote};

//! Utility functions for parsing user-supplied values and formatting output.

pub mod conversion;
pub mod formatting;

pub use conversion::{parse_address, parse_amount};
pub use formatting::format_token_amount;

//! Tuning data - the RON file every gameplay plugin reads from.

mod error;
mod tower_config;

pub use error::ConfigError;
pub use tower_config::*;

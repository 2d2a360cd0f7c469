//! Errors for the few fallible edges of the crate.
//!
//! Decoding and lifecycle handling never fail. Only turning host-supplied
//! config strings into typed values can.

use thiserror::Error;

/// Errors that can occur while reading configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The counter type string is not one the badge knows how to show.
    #[error("Unknown counter type: {0:?} (expected ECTOTOKEN or BONEMEAL)")]
    UnknownCounterType(String),
}

//! Configuration error type.
//!
//! Sub-crates define their own error enums; this one only covers
//! [`NetworkConfig`](crate::NetworkConfig) validation.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tolerance {0} must be finite and non-negative")]
    Tolerance(f64),

    #[error("config asks for directed = {config} but the graph adapter is directed = {adapter}")]
    DirectednessMismatch { config: bool, adapter: bool },

    #[error("graph adapter already holds {0} node(s); a network must start from an empty store")]
    AdapterNotEmpty(usize),
}

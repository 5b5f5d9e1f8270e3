//! Error types for sn-io.

use thiserror::Error;

use sn_network::NetworkError;

/// Errors that can occur while reading or writing a network.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Well-formed input that does not describe a network.
    #[error("format error: {0}")]
    Format(String),

    /// The records parsed but violate a network invariant.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Alias for `Result<T, IoError>`.
pub type IoResult<T> = Result<T, IoError>;

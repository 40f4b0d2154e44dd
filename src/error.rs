//! Error type shared by the predictor, the model adapter and the HTTP shim.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Request carried no sample value. The predictor is never invoked.
    #[error("No ECG value provided")]
    MissingInput,

    #[error("{0}")]
    InvalidInput(String),

    /// Classifier invocation failed or produced a malformed distribution.
    #[error("classification failed: {0}")]
    Classification(String),

    /// Invalid construction parameters; fatal at startup.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

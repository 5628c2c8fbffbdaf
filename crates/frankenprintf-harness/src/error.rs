//! Harness error type.

use frankenprintf_core::FormatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("engine error: {0}")]
    Format(#[from] FormatError),
    #[error("invalid argument '{input}': {reason}")]
    InvalidArg { input: String, reason: String },
}

impl HarnessError {
    pub(crate) fn invalid_arg(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArg {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

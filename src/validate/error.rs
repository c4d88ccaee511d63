// src/validate/error.rs

use thiserror::Error;

/// Failures talking to the validation service. Kept apart from
/// [`FormatError`](crate::dataset::FormatError): these say nothing about the
/// submitted text, only that no diagnostics could be obtained.
#[derive(Debug, Error)]
pub enum ValidationServiceError {
    #[error("validation request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("validation request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("validation service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode validation response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ValidationServiceError {
    /// Timeouts and connection-level failures may succeed on another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transport(_))
    }
}

impl From<reqwest::Error> for ValidationServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Transport(err)
        }
    }
}

use serde::Deserialize;
use thiserror::Error;

/// Shown when the analysis call exceeds its deadline.
pub const TIMEOUT_MESSAGE: &str =
    "Analysis timed out. The service might be taking too long to respond.";

/// Shown when a failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred.";

/// Ways an analysis call can fail. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// Non-success status with a `detail` message from the backend.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// Non-success status without a usable `detail`.
    #[error("Backend returned {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    /// Connection, protocol, or decoding failure.
    #[error("{0}")]
    Transport(String),
}

impl OracleError {
    /// Message to render, never empty.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            msg
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Timeout | Self::Transport(_) => None,
        }
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(e: serde_json::Error) -> Self {
        OracleError::Transport(format!("invalid response body: {e}"))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Build the error for a non-success response.
///
/// Only a non-blank string `detail` is surfaced verbatim. Validation errors
/// whose `detail` is a list, HTML bodies, and empty bodies all fall back to
/// the status line.
pub fn failure_from_response(status: u16, reason: &str, body: &str) -> OracleError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| match d {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        });

    match detail {
        Some(detail) => OracleError::Rejected { status, detail },
        None => OracleError::Status {
            status,
            reason: reason.to_string(),
        },
    }
}

//! Error types for the cropwatch client.

use thiserror::Error;

/// Errors surfaced by the API client and the sync core.
///
/// Stale responses are not represented here: a response that arrives after
/// its poll session stopped is discarded before any error or result is
/// dispatched, so consumers never observe it.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error {status} [{code}]: {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Malformed response envelope: {0}")]
    Envelope(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// True for failures worth retrying on the next poll tick.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Envelope(_) | ApiError::Json(_) | ApiError::Io(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 503,
            code: "SensorReadError".to_string(),
            message: "Failed to read from sensors.".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("503"));
        assert!(text.contains("SensorReadError"));
    }

    #[test]
    fn test_transient_classification() {
        let server = ApiError::Status {
            status: 503,
            code: "SensorReadError".to_string(),
            message: "unavailable".to_string(),
        };
        assert!(server.is_transient());

        let client = ApiError::Status {
            status: 400,
            code: "ValidationError".to_string(),
            message: "bad input".to_string(),
        };
        assert!(!client.is_transient());

        let shape = ApiError::Envelope("data field missing".to_string());
        assert!(!shape.is_transient());
    }
}

//! Error types for the content API client

use thiserror::Error;

/// Errors returned by content API calls
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The addressed resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or rejected credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success status
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Connection, TLS or timeout failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Rejected {
            status: 422,
            message: "name is required".into(),
        };
        assert_eq!(err.to_string(), "request rejected (422): name is required");
    }

    #[test]
    fn test_not_found_classification() {
        assert!(ApiError::NotFound("/content-types/9".into()).is_not_found());
        assert!(!ApiError::Transport("connection refused".into()).is_not_found());
    }
}

//! Relay error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that terminate handling of a single shout request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    /// Wrong content type or undecodable JSON.
    #[error("{0}")]
    BadRequest(String),

    /// Request body over the configured limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Missing or rejected license key.
    #[error("{0}")]
    Forbidden(String),

    /// Upstream failure or serialization failure.
    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    pub fn bad_content_type() -> Self {
        Self::BadRequest("BAD CONTENT-TYPE REQUEST".to_string())
    }

    pub fn bad_json() -> Self {
        Self::BadRequest("BAD JSON REQUEST".to_string())
    }

    pub fn body_too_large() -> Self {
        Self::PayloadTooLarge("REQUEST BODY TOO LARGE".to_string())
    }

    pub fn missing_license(header: &str) -> Self {
        Self::Forbidden(format!("NO {} SET", header.to_ascii_uppercase()))
    }

    pub fn bad_license() -> Self {
        Self::Forbidden("BAD LICENCE".to_string())
    }

    pub fn upstream(detail: impl std::fmt::Display) -> Self {
        Self::Internal(format!("UPSTREAM SHOUT ERROR: {}", detail))
    }

    /// HTTP status reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Forbidden(_) => StatusCode::FORBIDDEN,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RelayError::bad_json().status(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::bad_license().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            RelayError::body_too_large().status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            RelayError::upstream("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RelayError::missing_license("X-Authorization").to_string(),
            "NO X-AUTHORIZATION SET"
        );
        assert_eq!(
            RelayError::upstream("rate limited").to_string(),
            "UPSTREAM SHOUT ERROR: rate limited"
        );
        assert_eq!(RelayError::bad_content_type().to_string(), "BAD CONTENT-TYPE REQUEST");
    }
}

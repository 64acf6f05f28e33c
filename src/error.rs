//! Error types for the Indodax client library.

use thiserror::Error;

use crate::store::StoreError;

/// The main error type for all Indodax client operations.
#[derive(Error, Debug)]
pub enum IndodaxError {
    /// The request payload was rejected before any network work.
    ///
    /// This is a programmer error (empty payload, missing `method` field,
    /// or a reserved field supplied by the caller) and is never retried.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body could not be interpreted as the expected structure
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Indodax API returned an error
    #[error("Indodax API error: {0}")]
    Api(ApiError),

    /// The invalid_nonce retry budget was spent without a successful send
    #[error("invalid nonce: retries exhausted after {attempts} attempts")]
    NonceRetriesExhausted {
        /// Total number of sends performed before giving up
        attempts: u32,
    },

    /// Nonce or cache persistence failed
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Missing required credentials
    #[error("missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

/// An error reported by the Indodax API in the response body.
///
/// Private (`tapi`) responses carry both a machine-readable `error_code`
/// and a human-readable `error` sentence; public responses usually carry
/// only the sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The error code from Indodax (e.g., "invalid_nonce"), when present
    pub code: Option<String>,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}: {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl ApiError {
    /// Create a new API error from an optional code and a message.
    pub fn new(code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Check if this is a nonce mismatch, the only retryable API error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.code.as_deref() == Some(error_codes::INVALID_NONCE)
    }

    /// Check if this is an invalid key/signature rejection.
    pub fn is_invalid_credentials(&self) -> bool {
        self.code.as_deref() == Some(error_codes::INVALID_CREDENTIALS)
    }
}

/// Known Indodax error codes for pattern matching.
pub mod error_codes {
    /// Nonce was not greater than the last nonce the server has seen.
    pub const INVALID_NONCE: &str = "invalid_nonce";
    /// API key or signature rejected.
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    /// Request was structurally invalid.
    pub const BAD_REQUEST: &str = "bad_request";
    /// Unknown trading pair.
    pub const INVALID_PAIR: &str = "invalid_pair";
    /// Not enough balance to place the order.
    pub const INSUFFICIENT_BALANCE: &str = "insufficient_balance";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_with_code() {
        let error = ApiError::new(Some("invalid_pair".to_string()), "Pair not found");
        assert_eq!(error.to_string(), "invalid_pair: Pair not found");
    }

    #[test]
    fn test_api_error_display_without_code() {
        let error = ApiError::new(None, "Invalid pair");
        assert_eq!(error.to_string(), "Invalid pair");
    }

    #[test]
    fn test_invalid_nonce_predicate() {
        let error = ApiError::new(
            Some(error_codes::INVALID_NONCE.to_string()),
            "Nonce should be bigger than 100",
        );
        assert!(error.is_invalid_nonce());
        assert!(!error.is_invalid_credentials());
    }
}

//! Client error taxonomy
//!
//! Tagged result type replacing the original global response interceptor:
//! callers match on the variant instead of relying on thrown-exception
//! control flow.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by DevFlow API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401/403 from the login endpoint itself; user-correctable
    #[error("invalid username or password")]
    BadCredentials,

    /// 401/403 from any other endpoint; the caller must re-authenticate
    #[error("session expired, login required")]
    SessionExpired,

    /// Any other non-success status, with the server-provided message
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Success status with a body that does not match the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::BadCredentials | ApiError::SessionExpired)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

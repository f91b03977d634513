use thiserror::Error;

/// Client-side API error.
///
/// Every transport failure is surfaced as one of these; nothing is
/// retried automatically. Retry policy, if any, belongs to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No or expired session (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The server refused the operation (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// CSRF token missing or mismatched (HTTP 403 with CSRF detail).
    /// Retryable after re-priming via
    /// [`CsrfCoordinator::invalidate`](crate::transport::CsrfCoordinator::invalidate).
    #[error("csrf: {0}")]
    Csrf(String),

    /// Malformed request payload (HTTP 400/422). Surfaced verbatim.
    #[error("validation: {0}")]
    Validation(String),

    /// Any other non-2xx response.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// Connectivity failure.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-success status and its body to the error taxonomy.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => ApiError::Unauthorized(body),
            403 if body.contains("CSRF") => ApiError::Csrf(body),
            403 => ApiError::Forbidden(body),
            400 | 422 => ApiError::Validation(body),
            _ => ApiError::Server { status, message: body },
        }
    }
}

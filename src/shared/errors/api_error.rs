use thiserror::Error;

use super::AppError;

/// Classification of a non-success Studio response
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Rate limit exceeded, retry after {retry_after} seconds")]
    RateLimit { retry_after: u64 },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid API response: {message}")]
    InvalidResponse { message: String },

    #[error("API authentication failed")]
    AuthenticationFailed,

    #[error("Permission denied: {resource}")]
    PermissionDenied { resource: String },

    #[error("API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API service unavailable")]
    ServiceUnavailable,
}

impl ApiError {
    /// Map an HTTP status and the response body (or request URL) to an error
    pub fn from_status(status: u16, context: String) -> Self {
        match status {
            401 => ApiError::AuthenticationFailed,
            403 => ApiError::PermissionDenied { resource: context },
            404 => ApiError::NotFound { resource: context },
            429 => ApiError::RateLimit { retry_after: 0 },
            502..=504 => ApiError::ServiceUnavailable,
            _ => ApiError::Status {
                status,
                message: context,
            },
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RateLimit { .. } => AppError::RateLimitError(err.to_string()),
            ApiError::NotFound { resource } => AppError::NotFound(resource),
            ApiError::InvalidResponse { message } => AppError::SerializationError(message),
            ApiError::AuthenticationFailed => AppError::Unauthorized(err.to_string()),
            ApiError::PermissionDenied { resource } => AppError::PermissionDenied(resource),
            ApiError::ServiceUnavailable => AppError::ExternalServiceError(err.to_string()),
            ApiError::Status { .. } => AppError::ApiError(err.to_string()),
        }
    }
}

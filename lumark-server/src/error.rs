//! API error handling module
//!
//! Provides a unified error type for all API endpoints with structured error variants.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lumark_core::WatermarkError;
use thiserror::Error;

use crate::store::StoreError;

/// API error type with structured variants for different error categories
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request - client provided invalid input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found - requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Integrity gate rejected the image - it cannot reliably carry a mark
    #[error("Image rejected: {0}")]
    Rejected(String),

    /// Internal server error - unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Service unavailable - required service is not configured or available
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Watermark codec error
    #[error("Watermark error: {0}")]
    Watermark(#[from] WatermarkError),

    /// Mark store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a gate-rejection error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a service unavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Watermark(ref e) => match e {
                // Client-provided invalid input → 400
                WatermarkError::MalformedImage(_) | WatermarkError::MalformedPayload(_) => {
                    StatusCode::BAD_REQUEST
                }

                // Size floor is an image-quality verdict → 422
                WatermarkError::ImageTooSmall { .. } => StatusCode::UNPROCESSABLE_ENTITY,

                // Internal processing failures → 500
                WatermarkError::ImageEncode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(ref e) => match e {
                StoreError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
                StoreError::Migration(_)
                | StoreError::Query(_)
                | StoreError::DuplicatePayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the error code for programmatic error handling
    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Rejected(_) => "IMAGE_REJECTED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Watermark(ref e) => match e {
                WatermarkError::MalformedImage(_) => "MALFORMED_IMAGE",
                WatermarkError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
                WatermarkError::ImageTooSmall { .. } => "IMAGE_TOO_SMALL",
                WatermarkError::ImageEncode(_) => "IMAGE_ENCODE_ERROR",
            },
            Self::Store(ref e) => match e {
                StoreError::Connection(_) => "STORE_UNAVAILABLE",
                StoreError::Migration(_) => "STORE_MIGRATION_ERROR",
                StoreError::Query(_) => "STORE_QUERY_ERROR",
                StoreError::DuplicatePayload(_) => "DUPLICATE_PAYLOAD",
            },
        }
    }

    /// Get sanitized error message for client response
    fn client_message(&self) -> String {
        match self {
            // Image-quality verdicts get one stable user-facing phrasing
            Self::Rejected(_) => "Image quality insufficient for reliable marking".to_string(),
            Self::Watermark(WatermarkError::ImageTooSmall { rows, cols, min }) => {
                format!("Image {}x{} is below the {}x{} minimum", cols, rows, min, min)
            }
            // Store internals are never echoed to clients
            Self::Store(ref e) => match e {
                StoreError::Connection(_) => "Mark store unavailable".to_string(),
                StoreError::Migration(_) | StoreError::Query(_) => {
                    "Mark store operation failed".to_string()
                }
                StoreError::DuplicatePayload(_) => {
                    "Payload collision, retry the request".to_string()
                }
            },
            _ => self.to_string(),
        }
    }

    /// Get the error category for logging
    fn error_category(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Rejected(_) => "rejected",
            Self::Internal(_) => "internal",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Watermark(_) => "watermark",
            Self::Store(_) => "store",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.error_category();
        let code = self.error_code();
        let internal_message = self.to_string();
        let client_message = self.client_message();

        // Log based on severity, always including internal details
        match &self {
            Self::BadRequest(_) | Self::NotFound(_) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Client error"
                );
            }
            Self::Rejected(_) | Self::Watermark(_) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Codec error"
                );
            }
            Self::ServiceUnavailable(_) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Service unavailable"
                );
            }
            Self::Internal(_) | Self::Store(_) => {
                tracing::error!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Server error"
                );
            }
        }

        // All error responses include a `code` field for programmatic error handling
        let body = serde_json::json!({
            "error": client_message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watermark_error_status_mapping() {
        let err = ApiError::from(WatermarkError::MalformedImage("bad".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(WatermarkError::ImageTooSmall {
            rows: 64,
            cols: 64,
            min: 128,
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_rejection_maps_to_422() {
        let err = ApiError::rejected("capacity shortfall");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "IMAGE_REJECTED");
    }

    #[test]
    fn test_store_errors_are_sanitized() {
        let err = ApiError::from(StoreError::Query("SELECT blew up at line 3".into()));
        assert!(!err.client_message().contains("SELECT"));
    }
}

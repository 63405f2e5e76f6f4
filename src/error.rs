use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error type as string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Internal(_) => "internal_error",
            AppError::Validation(_) => "validation_error",
            AppError::BadRequest(_) => "bad_request",
        }
    }

    /// Check if this error should be logged
    pub fn should_log(&self) -> bool {
        match self {
            // Caller mistakes (4xx), retryable with corrected input
            AppError::Validation(_) | AppError::BadRequest(_) => false,

            AppError::Internal(_) => true,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.should_log() {
            tracing::error!("AppError: {} (status: {})", self, status);
        } else {
            tracing::debug!("AppError: {} (status: {})", self, status);
        }

        let body = json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
                "status": status.as_u16()
            }
        });

        (status, Json(body)).into_response()
    }
}

// Convenience constructors
impl AppError {
    pub fn validation<T: std::fmt::Display>(msg: T) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn bad_request<T: std::fmt::Display>(msg: T) -> Self {
        Self::BadRequest(msg.to_string())
    }
}

// Malformed or incomplete records are the caller's to fix.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

// Type alias for Results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::validation("test").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::bad_request("test").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("test")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_types() {
        assert_eq!(AppError::validation("test").error_type(), "validation_error");
        assert_eq!(AppError::bad_request("test").error_type(), "bad_request");
        assert_eq!(AppError::Internal(anyhow::anyhow!("x")).error_type(), "internal_error");
    }

    #[test]
    fn test_should_log() {
        assert!(!AppError::validation("test").should_log());
        assert!(!AppError::bad_request("test").should_log());
        assert!(AppError::Internal(anyhow::anyhow!("test")).should_log());
    }

    #[test]
    fn test_conversions() {
        let app_error: AppError = anyhow::anyhow!("test error").into();
        assert!(matches!(app_error, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_response_body() {
        let response = AppError::validation("duplicate task id 3").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["type"], "validation_error");
        assert_eq!(body["error"]["status"], 400);
        assert_eq!(
            body["error"]["message"],
            "Validation error: duplicate task id 3"
        );
    }
}

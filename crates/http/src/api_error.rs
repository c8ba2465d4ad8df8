//! Typed API error for HTTP handlers.
//!
//! Converts service errors into proper HTTP responses with JSON body and
//! status codes. Handlers return `Result<Response, ApiError>` instead of
//! losing error context with bare `StatusCode`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use placelore_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — invalid input from caller.
    BadRequest(String),
    /// 500 Internal Server Error — generation, search, or storage failure.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            other => {
                tracing::error!(error = %other, "request failed");
                Self::Internal(other.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_400() {
        let api: ApiError = ServiceError::InvalidInput("location is required".to_owned()).into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_context_maps_to_500() {
        let api: ApiError = ServiceError::NoContext.into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Unified error handling with consistent API response envelope.

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
        })
    }

    /// Wrap an error in the envelope.
    pub fn error(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// A query operation failed. The message names the operation; the
    /// underlying cause has already been logged.
    #[error("{0}")]
    DataAccess(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a `map_err` adapter that logs the cause and replaces it with
    /// a `DataAccess` error carrying `message`.
    ///
    /// ```ignore
    /// query(db).await.map_err(AppError::data_access("Failed to fetch invoice."))
    /// ```
    pub fn data_access<E: Display>(message: &'static str) -> impl FnOnce(E) -> AppError {
        move |cause| {
            tracing::error!(error = %cause, operation = message, "Database error");
            AppError::DataAccess(message.to_string())
        }
    }

    /// Check if this error is a wrapped query failure.
    pub fn is_data_access(&self) -> bool {
        matches!(self, Self::DataAccess(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::DataAccess(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATA_ACCESS_ERROR",
                msg.clone(),
            ),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Decode(e) => {
                tracing::error!(error = %e, "Document decode error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()> {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message,
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn api_response_success() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["data"], "hello");
        assert!(json["error"].is_null());
    }

    #[test]
    fn api_response_error() {
        let response = ApiResponse::<()>::error("NOT_FOUND", "Item not found");
        let json = serde_json::to_value(&response.0).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Item not found");
    }

    #[test]
    fn data_access_replaces_cause_with_operation_message() {
        let err = AppError::data_access("Failed to fetch invoice.")("connection reset");
        assert!(err.is_data_access());
        assert_eq!(err.to_string(), "Failed to fetch invoice.");
    }

    #[test]
    fn data_access_maps_to_internal_server_error() {
        let response = AppError::DataAccess("Failed to fetch card data.".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let response = AppError::Validation("query too long".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn app_error_from_bson_decode() {
        let decode_err = mongodb::bson::from_document::<i32>(doc! { "a": 1 }).unwrap_err();
        let err: AppError = decode_err.into();
        assert!(matches!(err, AppError::Decode(_)));
    }
}

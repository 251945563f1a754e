//! Shared API types
//!
//! Error responses shared by every endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::data::DataError;
use crate::domain::buses::ValidationError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Internal { code: String, message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: "INTERNAL".to_string(),
            message: message.into(),
        }
    }

    pub fn from_data(e: DataError) -> Self {
        match e {
            DataError::UnknownDataset(id) => {
                Self::not_found("DATASET_NOT_FOUND", format!("Dataset not found: {}", id))
            }
            DataError::Format { .. } => {
                tracing::error!(error = %e, "Stored interval could not be formatted");
                Self::Internal {
                    code: "INVALID_INTERVAL".to_string(),
                    message: e.to_string(),
                }
            }
            other => {
                tracing::error!(error = %other, backend = other.backend(), "Data error");
                Self::internal("Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::bad_request("VALIDATION_ERROR", e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Internal { code, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                code,
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::FormatError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_dataset_is_not_found() {
        let response =
            ApiError::from_data(DataError::UnknownDataset("rb_mars".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["code"], "DATASET_NOT_FOUND");
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_format_error_keeps_column() {
        let err = DataError::format("duration", 2, FormatError::Malformed("soon".into()));
        let response = ApiError::from_data(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_INTERVAL");
        assert!(body["message"].as_str().unwrap().contains("duration"));
    }

    #[tokio::test]
    async fn test_database_error_message_is_generic() {
        let response =
            ApiError::from_data(DataError::from_sqlite(sqlx::Error::PoolClosed)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL");
        assert_eq!(body["message"], "Database operation failed");
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let err: ApiError = ValidationError::InvertedPriceRange { min: 900, max: 100 }.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

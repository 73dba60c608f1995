//! # API Error Handling
//!
//! Unified error type returned by every handler.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation to Client                          │
//! │                                                                         │
//! │  CoreError ──► DbError ──┐                                              │
//! │                          ├──► ApiError ──► IntoResponse                 │
//! │  RateError ──────────────┘        │                                     │
//! │                                   ▼                                     │
//! │                   HTTP status + { "code": "...", "detail": "..." }      │
//! │                                                                         │
//! │  NOT_FOUND 404 · INSUFFICIENT_STOCK 400 · VALIDATION_ERROR 422         │
//! │  UNAUTHORIZED 401 · CONFLICT 409 · SERVICE_UNAVAILABLE 503             │
//! │  DATA_ERROR 500 · INTERNAL 500                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use estoque_core::{CoreError, ValidationError};
use estoque_db::DbError;

use crate::rates::RateError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "detail": "Produto não encontrado: 12"
/// }
/// ```
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{code:?}: {detail}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub detail: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Category or product not found (404)
    NotFound,

    /// Sale quantity exceeds stock (400)
    InsufficientStock,

    /// Input validation failed (422)
    ValidationError,

    /// Missing, invalid or expired credentials (401)
    Unauthorized,

    /// Username already taken (409)
    Conflict,

    /// Quote service unreachable (503)
    ServiceUnavailable,

    /// Quote service returned an unusable payload (500)
    DataError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InsufficientStock => StatusCode::BAD_REQUEST,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::DataError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        ApiError {
            code,
            detail: detail.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(detail: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, detail)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, detail)
    }

    /// Creates an internal error.
    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        let mut response = (status, Json(&self)).into_response();
        if self.code == ErrorCode::Unauthorized {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Conversions
// =============================================================================

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CategoryNotFound(_) | CoreError::ProductNotFound(_) => {
                ApiError::new(ErrorCode::NotFound, err.to_string())
            }
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(e) => e.into(),
            DbError::NotFound { entity, id } => {
                ApiError::new(ErrorCode::NotFound, format!("{entity} not found: {id}"))
            }
            DbError::UniqueViolation { value, .. } => {
                ApiError::new(ErrorCode::Conflict, format!("'{value}' already exists"))
            }
            DbError::PoolExhausted => ApiError::new(
                ErrorCode::ServiceUnavailable,
                "Database pool exhausted",
            ),
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::internal("Database operation failed")
            }
        }
    }
}

/// Converts quote gateway errors to API errors.
impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::Unavailable(_) => ApiError::new(
                ErrorCode::ServiceUnavailable,
                "Serviço de cotação indisponível",
            ),
            RateError::Malformed(_) => {
                ApiError::new(ErrorCode::DataError, "Erro ao processar dados da cotação")
            }
        }
    }
}

// Extractor rejections keep the `{code, detail}` body shape.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::InsufficientStock.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ServiceUnavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ErrorCode::DataError.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::Conflict.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_core_error_conversion() {
        let err: ApiError = CoreError::InsufficientStock {
            product_id: 1,
            available: 3,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err: ApiError = DbError::Domain(CoreError::CategoryNotFound(4)).into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_duplicate_user_is_conflict() {
        let err: ApiError = DbError::duplicate("usuarios.username", "maria").into();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[test]
    fn test_unauthorized_sets_header() {
        let response = ApiError::unauthorized("nope").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::validation("descricao is required")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["detail"], "descricao is required");
    }
}

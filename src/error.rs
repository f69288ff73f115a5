use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

/// Error taxonomy shared by every handler. Each variant maps to one HTTP
/// status and renders as `{"success": false, "message": ...}`.
///
/// Store and filesystem failures keep their detail out of the response body;
/// the underlying error is logged instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database operation failed")]
    Storage(#[from] DbErr),
    #[error("confirmation log update failed")]
    AuditLog(#[from] std::io::Error),
}

impl ApiError {
    pub fn auth(message: impl Into<String>) -> Self {
        ApiError::Auth(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn missing_field(field: &str) -> Self {
        ApiError::Validation(format!("Missing required field: {field}"))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) | ApiError::AuditLog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Storage(source) => {
                tracing::error!(error = %source, "database operation failed");
            }
            ApiError::AuditLog(source) => {
                tracing::error!(error = %source, "confirmation log update failed");
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "message": self.to_string(),
        }))
    }
}

/// Unwrap an optional request field or fail with a `Validation` error naming
/// the field.
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = require::<i32>(None, "quantity").unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: quantity");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn present_field_passes_through() {
        assert_eq!(require(Some(3), "quantity").unwrap(), 3);
    }

    #[test]
    fn storage_errors_hide_the_store_detail() {
        let err = ApiError::from(DbErr::Custom("relation orders does not exist".into()));
        assert_eq!(err.to_string(), "database operation failed");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        assert_eq!(
            ApiError::auth("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("admins only").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("order").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("already submitted").status_code(),
            StatusCode::CONFLICT
        );
    }
}

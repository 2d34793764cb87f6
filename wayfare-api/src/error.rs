use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wayfare_core::{CoreError, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    AuthenticationError(String),
    #[error("{0}")]
    AuthorizationError(String),
    #[error("{0}")]
    ValidationError(ValidationErrors),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{0}")]
    ConflictError(String),
    #[error("{0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, json!({ "error": msg })),
            AppError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "fields": errors }),
            ),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(errors) => AppError::ValidationError(errors),
            err @ CoreError::NotFound { .. } => AppError::NotFoundError(err.to_string()),
            CoreError::PermissionDenied(msg) => AppError::AuthorizationError(msg),
            err @ CoreError::InvalidStateTransition { .. } => AppError::ConflictError(err.to_string()),
            CoreError::InternalError(msg) => AppError::InternalServerError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_status_codes() {
        let cases = [
            (CoreError::not_found("Booking", "42"), StatusCode::NOT_FOUND),
            (CoreError::PermissionDenied("no".to_string()), StatusCode::FORBIDDEN),
            (
                CoreError::InvalidStateTransition {
                    from: "cancelled".to_string(),
                    to: "cancelled".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (CoreError::InternalError("pool timed out".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (CoreError::ValidationError(ValidationErrors::new()), StatusCode::BAD_REQUEST),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }
}

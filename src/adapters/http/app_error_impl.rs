use crate::app_error::AppError;
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shieldguard_types::{ErrorCode, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        match self {
            AppError::Unauthenticated(reason) => error_resp(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthenticated,
                "Authentication required",
                Some(reason),
            ),
            AppError::Configuration(msg) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ConfigurationError,
                "Billing is not configured",
                Some(msg),
            ),
            AppError::Upstream(msg) => error_resp(
                StatusCode::BAD_GATEWAY,
                ErrorCode::UpstreamError,
                "Billing provider request failed",
                Some(msg),
            ),
            AppError::InvalidInput(msg) => error_resp(
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidInput,
                "Invalid input",
                Some(msg),
            ),
            AppError::Database(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseError,
                "Database error",
                None,
            ),
            AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                "Internal error",
                None,
            ),
        }
    }
}

fn error_resp(
    status: StatusCode,
    code: ErrorCode,
    error: &str,
    details: Option<String>,
) -> Response {
    let body = ErrorResponse {
        error: error.to_string(),
        code,
        details,
    };
    (status, Json(body)).into_response()
}

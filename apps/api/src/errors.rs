use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Bodies are flat `{"error": "..."}` objects; client JavaScript renders the
/// string verbatim, so messages must stay stable.
///
/// Draft generation itself cannot fail (the fallback tier always yields a
/// review), so there is no generation-error variant; the only 500 is the
/// missing credential.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing employee")]
    MissingEmployee,

    #[error("Missing {0}")]
    MissingCredential(&'static str),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingEmployee => {
                (StatusCode::BAD_REQUEST, "Missing employee".to_string())
            }
            AppError::MissingCredential(var) => {
                tracing::error!("configuration error: {var} is not set");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Missing {var}"))
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::MissingEmployee.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MissingCredential("OPENAI_API_KEY_REAL")
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}

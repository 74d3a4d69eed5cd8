//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use billsplit_core::bill::BillValidationError;
use billsplit_line::LineError;
use billsplit_shared::AppError;
use serde_json::json;
use tracing::error;

/// An `AppError` rendered as `{ "error": <code>, "message": <text> }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string()
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<BillValidationError> for ApiError {
    fn from(err: BillValidationError) -> Self {
        Self(err.into())
    }
}

impl From<LineError> for ApiError {
    fn from(err: LineError) -> Self {
        if matches!(err, LineError::Transport(_)) {
            error!(error = %err, "LIFF verify error");
        }
        Self(err.into())
    }
}

impl ApiError {
    /// 500 for a failed database operation, with a user-facing message.
    #[must_use]
    pub fn database(message: &str) -> Self {
        Self(AppError::Database(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError(AppError::Validation("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "validation_error", "message": "bad" }));
    }

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let err: ApiError = BillValidationError::MissingChatId.into();
        assert_eq!(err.0.status_code(), 400);
        assert_eq!(err.0.to_string(), "ไม่พบรหัสแชทจาก LINE");
    }
}

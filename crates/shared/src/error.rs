//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// The message carried by each variant is user-facing: the API layer returns
/// it verbatim in the `message` field of the error body.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, invalid or expired LIFF token.
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// Database error.
    #[error("{0}")]
    Database(String),

    /// LINE platform call failed.
    #[error("{0}")]
    ExternalService(String),

    /// A required server-side setting is missing.
    #[error("{0}")]
    NotConfigured(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Database(_)
            | Self::ExternalService(_)
            | Self::NotConfigured(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::Database(_) => "database_error",
            Self::ExternalService(_) => "external_service_error",
            Self::NotConfigured(_) => "not_configured",
            Self::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized(String::new()), 401, "unauthorized")]
    #[case(AppError::NotFound(String::new()), 404, "not_found")]
    #[case(AppError::Validation(String::new()), 400, "validation_error")]
    #[case(AppError::Database(String::new()), 500, "database_error")]
    #[case(AppError::ExternalService(String::new()), 500, "external_service_error")]
    #[case(AppError::NotConfigured(String::new()), 500, "not_configured")]
    #[case(AppError::Internal(String::new()), 500, "internal_error")]
    fn test_status_and_code(#[case] error: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(error.status_code(), status);
        assert_eq!(error.error_code(), code);
    }

    #[test]
    fn test_error_display_is_message() {
        assert_eq!(
            AppError::Unauthorized("No token provided".into()).to_string(),
            "No token provided"
        );
        assert_eq!(
            AppError::Validation("กรุณากรอกเลขบัญชีธนาคาร".into()).to_string(),
            "กรุณากรอกเลขบัญชีธนาคาร"
        );
    }
}

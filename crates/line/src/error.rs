//! LINE adapter errors.

use billsplit_shared::AppError;

/// Errors returned by the LINE adapters.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// Request never produced a response, or the body could not be read.
    #[error("LINE request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// LINE answered with a non-success status.
    #[error("LINE API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The LIFF access token was rejected by LINE.
    #[error("Invalid token ({status}) {body}")]
    InvalidToken {
        /// HTTP status code from the verify endpoint.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The token was issued for another LIFF channel.
    #[error("Invalid LIFF token (client_id mismatch)")]
    ClientIdMismatch,

    /// Neither the token nor the profile carried a user id.
    #[error("Failed to resolve LINE user ID")]
    UnresolvedUser,

    /// A chat or user id that cannot be placed in a request path.
    #[error("Invalid LINE id: {0}")]
    InvalidId(String),

    /// A required credential is not configured.
    #[error("LINE {0} is not configured")]
    NotConfigured(&'static str),
}

impl From<LineError> for AppError {
    fn from(err: LineError) -> Self {
        match err {
            LineError::InvalidToken { .. } | LineError::ClientIdMismatch => {
                Self::Unauthorized(err.to_string())
            }
            LineError::Transport(_) => Self::ExternalService("Failed to verify LIFF token".into()),
            LineError::UnresolvedUser => Self::Internal(err.to_string()),
            LineError::InvalidId(_) => Self::Validation(err.to_string()),
            LineError::NotConfigured(_) => Self::NotConfigured(err.to_string()),
            LineError::Api { .. } => Self::ExternalService(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_map_to_unauthorized() {
        let err: AppError = LineError::ClientIdMismatch.into();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.to_string(), "Invalid LIFF token (client_id mismatch)");

        let err: AppError = LineError::InvalidToken {
            status: 400,
            body: "expired".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid token (400) expired");
    }

    #[test]
    fn test_invalid_id_is_validation_error() {
        let err: AppError = LineError::InvalidId("C1/../x".into()).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Invalid LINE id: C1/../x");
    }

    #[test]
    fn test_unresolved_user_is_server_error() {
        let err: AppError = LineError::UnresolvedUser.into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "Failed to resolve LINE user ID");
    }
}

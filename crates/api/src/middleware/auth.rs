//! LIFF token authentication.
//!
//! Handlers call `authenticate` after validating the request body, so a
//! malformed request is reported before the token is checked.

use axum::http::{HeaderMap, header::AUTHORIZATION};
use billsplit_line::{AuthenticatedUser, bearer_token};
use billsplit_shared::AppError;

use crate::{AppState, error::ApiError};

/// Verifies the `Authorization: Bearer <LIFF access token>` header.
///
/// # Errors
///
/// Returns 401 for a missing or rejected token, and 500 when LINE cannot be
/// reached or no user id can be resolved.
pub async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| ApiError(AppError::Unauthorized("No token provided".to_string())))?;

    Ok(state.identity.verify(token).await?)
}

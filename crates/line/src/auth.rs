//! LIFF access token verification.
//!
//! A token is accepted when LINE's verify endpoint knows it and it was issued
//! for the configured LIFF channel. The user id comes from the token's `sub`
//! claim, falling back to the profile endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::client::{LineClient, error_for_status};
use crate::error::LineError;

/// A caller whose LIFF token was verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The raw access token.
    pub token: String,
    /// LINE user id.
    pub user_id: String,
    /// Display name from the profile, if it could be loaded.
    pub display_name: Option<String>,
}

/// Verifies LIFF access tokens.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verifies `token` and resolves the user it belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is invalid, belongs to another channel,
    /// or no user id can be resolved.
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, LineError>;
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    client_id: Option<String>,
    sub: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    user_id: Option<String>,
    display_name: Option<String>,
}

/// `IdentityVerifier` backed by the LINE Login API.
#[derive(Debug, Clone)]
pub struct LiffVerifier {
    client: LineClient,
    liff_channel_id: Option<String>,
}

impl LiffVerifier {
    /// Creates a verifier. Without a channel id every token is rejected.
    #[must_use]
    pub const fn new(client: LineClient, liff_channel_id: Option<String>) -> Self {
        Self {
            client,
            liff_channel_id,
        }
    }

    async fn verify_token(&self, token: &str) -> Result<Option<String>, LineError> {
        let response = self
            .client
            .http()
            .get(self.client.url("/oauth2/v2.1/verify"))
            .query(&[("access_token", token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LineError::InvalidToken {
                status: status.as_u16(),
                body,
            });
        }

        let verified: VerifyResponse = response.json().await?;
        let expected = self.liff_channel_id.as_deref().filter(|id| !id.is_empty());
        if expected.is_none() || verified.client_id.as_deref() != expected {
            return Err(LineError::ClientIdMismatch);
        }

        Ok(verified.sub.filter(|sub| !sub.is_empty()))
    }

    async fn load_profile(&self, token: &str) -> Option<ProfileResponse> {
        let result = async {
            let response = self
                .client
                .http()
                .get(self.client.url("/v2/profile"))
                .bearer_auth(token)
                .send()
                .await?;
            let profile: ProfileResponse = error_for_status(response).await?.json().await?;
            Ok::<_, LineError>(profile)
        }
        .await;

        match result {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "LINE profile fetch failed");
                None
            }
        }
    }
}

#[async_trait]
impl IdentityVerifier for LiffVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, LineError> {
        let mut user_id = self.verify_token(token).await?;
        let mut display_name = None;

        if let Some(profile) = self.load_profile(token).await {
            if user_id.is_none() {
                user_id = profile.user_id.filter(|id| !id.is_empty());
            }
            display_name = profile.display_name;
        }

        let user_id = user_id.ok_or(LineError::UnresolvedUser)?;
        Ok(AuthenticatedUser {
            token: token.to_string(),
            user_id,
            display_name,
        })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = rest.trim_start();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("bearer   abc.def", Some("abc.def"))]
    #[case("BEARER x", Some("x"))]
    #[case("Bearer", None)]
    #[case("Bearer ", None)]
    #[case("Basic abc", None)]
    #[case("", None)]
    fn test_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(header), expected);
    }
}

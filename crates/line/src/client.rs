//! HTTP client shared by the LINE adapters.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::LineError;

/// Thin wrapper over `reqwest` bound to the LINE API base URL.
#[derive(Debug, Clone)]
pub struct LineClient {
    http: reqwest::Client,
    base_url: String,
}

impl LineClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LineError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds an absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a GET request and decodes a JSON response.
    ///
    /// # Errors
    ///
    /// Returns `LineError::Api` for non-success statuses and
    /// `LineError::Transport` for network or decoding failures.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LineError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(bearer)
            .query(query)
            .send()
            .await?;

        Ok(error_for_status(response).await?.json().await?)
    }

    /// Sends a JSON POST request, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns `LineError::Api` for non-success statuses and
    /// `LineError::Transport` for network failures.
    pub async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        bearer: &str,
        body: &B,
    ) -> Result<(), LineError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;

        error_for_status(response).await?;
        Ok(())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

pub(crate) async fn error_for_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, LineError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LineError::Api {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = LineClient::new("https://api.line.me/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url("/v2/bot/message/push"),
            "https://api.line.me/v2/bot/message/push"
        );
    }
}

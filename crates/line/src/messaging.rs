//! Messaging API: message delivery and the chat member directory.

use std::collections::HashSet;

use async_trait::async_trait;
use billsplit_core::bill::ChatType;
use billsplit_core::message::Message;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::LineClient;
use crate::error::LineError;

/// Profile of a chat member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    /// LINE user id.
    pub user_id: String,
    /// Display name.
    pub display_name: Option<String>,
}

/// Outbound side of the bot: chat messages and member lookups.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Pushes messages to a user, group or room.
    ///
    /// # Errors
    ///
    /// Returns an error if LINE rejects the request or it cannot be sent.
    async fn push_message(&self, to: &str, messages: &[Message]) -> Result<(), LineError>;

    /// Replies to a webhook event.
    ///
    /// # Errors
    ///
    /// Returns an error if LINE rejects the request or it cannot be sent.
    async fn reply_message(&self, reply_token: &str, messages: &[Message])
    -> Result<(), LineError>;

    /// Lists every member id of a chat, deduplicated in first-seen order.
    ///
    /// A failed page ends pagination; ids collected so far are kept.
    async fn list_member_ids(&self, chat_type: ChatType, chat_id: &str) -> Vec<String>;

    /// Loads one member's profile; failures yield `None`.
    async fn member_profile(
        &self,
        chat_type: ChatType,
        chat_id: &str,
        user_id: &str,
    ) -> Option<MemberProfile>;
}

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberIdsPage {
    #[serde(default)]
    member_ids: Vec<String>,
    next: Option<String>,
}

/// `ChatGateway` backed by the Messaging API and a channel access token.
#[derive(Debug, Clone)]
pub struct MessagingClient {
    client: LineClient,
    channel_access_token: String,
}

impl MessagingClient {
    /// Creates a messaging client.
    #[must_use]
    pub const fn new(client: LineClient, channel_access_token: String) -> Self {
        Self {
            client,
            channel_access_token,
        }
    }

    async fn member_ids_page(
        &self,
        chat_type: ChatType,
        chat_id: &str,
        start: Option<&str>,
    ) -> Result<MemberIdsPage, LineError> {
        let chat_id = path_id(chat_id)?;
        let path = format!("/v2/bot/{}/{chat_id}/members/ids", chat_type.as_str());
        let query: Vec<(&str, &str)> = start.map(|s| ("start", s)).into_iter().collect();
        self.client
            .get_json(&path, &self.channel_access_token, &query)
            .await
    }
}

#[async_trait]
impl ChatGateway for MessagingClient {
    async fn push_message(&self, to: &str, messages: &[Message]) -> Result<(), LineError> {
        debug!(to = %to, count = messages.len(), "Pushing LINE messages");
        self.client
            .post_json(
                "/v2/bot/message/push",
                &self.channel_access_token,
                &PushRequest { to, messages },
            )
            .await
    }

    async fn reply_message(
        &self,
        reply_token: &str,
        messages: &[Message],
    ) -> Result<(), LineError> {
        self.client
            .post_json(
                "/v2/bot/message/reply",
                &self.channel_access_token,
                &ReplyRequest {
                    reply_token,
                    messages,
                },
            )
            .await
    }

    async fn list_member_ids(&self, chat_type: ChatType, chat_id: &str) -> Vec<String> {
        let mut ids = Vec::new();
        let mut start: Option<String> = None;

        loop {
            match self
                .member_ids_page(chat_type, chat_id, start.as_deref())
                .await
            {
                Ok(page) => {
                    ids.extend(page.member_ids);
                    match page.next.filter(|next| !next.is_empty()) {
                        Some(next) => start = Some(next),
                        None => break,
                    }
                }
                Err(e) => {
                    warn!(error = %e, chat_id = %chat_id, "Listing chat member ids failed");
                    break;
                }
            }
        }

        dedupe(ids)
    }

    async fn member_profile(
        &self,
        chat_type: ChatType,
        chat_id: &str,
        user_id: &str,
    ) -> Option<MemberProfile> {
        let lookup = async {
            let path = format!(
                "/v2/bot/{}/{}/member/{}",
                chat_type.as_str(),
                path_id(chat_id)?,
                path_id(user_id)?
            );
            self.client
                .get_json(&path, &self.channel_access_token, &[])
                .await
        };
        match lookup.await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, user_id = %user_id, "Member profile lookup failed");
                None
            }
        }
    }
}

/// LINE ids are plain ASCII alphanumerics; anything else would change the
/// request path.
fn path_id(id: &str) -> Result<&str, LineError> {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(id)
    } else {
        Err(LineError::InvalidId(id.to_string()))
    }
}

/// Removes duplicate ids, keeping the first occurrence.
#[must_use]
pub fn dedupe(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_id_rejects_path_characters() {
        assert_eq!(path_id("Cabc123").unwrap(), "Cabc123");
        for id in ["", "C1/../../message/push", "U1?x=1", "C1%2F", "U 1"] {
            assert!(matches!(path_id(id), Err(LineError::InvalidId(_))), "{id}");
        }
    }

    #[test]
    fn test_dedupe_keeps_first_seen_order() {
        let ids = vec!["b", "a", "b", "c", "a"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(dedupe(ids), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_reply_request_shape() {
        let messages = [Message::text("hi")];
        let value = serde_json::to_value(ReplyRequest {
            reply_token: "r1",
            messages: &messages,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "replyToken": "r1", "messages": [{ "type": "text", "text": "hi" }] })
        );
    }
}

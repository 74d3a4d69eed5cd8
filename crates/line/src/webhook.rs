//! Webhook event model.
//!
//! Only the events the bot reacts to are modelled; everything else parses as
//! `Other`. Events are decoded one by one so a single malformed event does not
//! drop the rest of the delivery.

use billsplit_core::bill::ChatType;
use serde::Deserialize;
use tracing::warn;

/// Where an event came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum EventSource {
    /// One-on-one chat with the bot.
    User {
        /// Sender.
        user_id: String,
    },
    /// Group chat.
    Group {
        /// Group id.
        group_id: String,
        /// Sender, when LINE shares it.
        #[serde(default)]
        user_id: Option<String>,
    },
    /// Multi-person room.
    Room {
        /// Room id.
        room_id: String,
        /// Sender, when LINE shares it.
        #[serde(default)]
        user_id: Option<String>,
    },
}

impl EventSource {
    /// The group or room the event happened in.
    #[must_use]
    pub fn chat(&self) -> Option<(ChatType, &str)> {
        match self {
            Self::User { .. } => None,
            Self::Group { group_id, .. } => Some((ChatType::Group, group_id)),
            Self::Room { room_id, .. } => Some((ChatType::Room, room_id)),
        }
    }

    /// The user who triggered the event, if known.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { user_id, .. } | Self::Room { user_id, .. } => user_id.as_deref(),
        }
    }
}

/// Message content of a `message` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventMessage {
    /// Text message.
    Text {
        /// Message text.
        #[serde(default)]
        text: String,
    },
    /// Stickers, images and other content.
    #[serde(other)]
    Other,
}

/// Postback payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Postback {
    /// Data attached to the tapped button.
    pub data: String,
}

/// A webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum WebhookEvent {
    /// The bot joined a group or room.
    Join {
        /// Event source.
        source: EventSource,
    },
    /// A user added the bot as a friend.
    Follow {
        /// Event source.
        source: EventSource,
    },
    /// A chat message.
    Message {
        /// Event source.
        source: EventSource,
        /// Token for replying to this event.
        reply_token: Option<String>,
        /// Message content.
        message: EventMessage,
    },
    /// A postback button was tapped.
    Postback {
        /// Event source.
        source: EventSource,
        /// Token for replying to this event.
        reply_token: Option<String>,
        /// Postback payload.
        postback: Postback,
    },
    /// Any other event type.
    #[serde(other)]
    Other,
}

impl WebhookEvent {
    /// Short event name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Follow { .. } => "follow",
            Self::Message { .. } => "message",
            Self::Postback { .. } => "postback",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Deserialize)]
struct WebhookBody {
    #[serde(default)]
    events: Vec<serde_json::Value>,
}

/// Decodes the events of a webhook body.
///
/// An empty or malformed body yields no events; events that fail to decode
/// are logged and skipped.
#[must_use]
pub fn parse_events(body: &[u8]) -> Vec<WebhookEvent> {
    if body.is_empty() {
        return Vec::new();
    }

    let parsed: WebhookBody = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Webhook body is not valid JSON");
            return Vec::new();
        }
    };

    parsed
        .events
        .into_iter()
        .filter_map(|raw| match serde_json::from_value(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable webhook event");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(events: &serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&json!({ "destination": "Ubot", "events": events })).unwrap()
    }

    #[test]
    fn test_parse_text_message_from_group() {
        let events = parse_events(&body(&json!([{
            "type": "message",
            "replyToken": "r1",
            "timestamp": 1,
            "source": { "type": "group", "groupId": "C1", "userId": "U1" },
            "message": { "id": "m1", "type": "text", "text": "!สร้างบิล" }
        }])));

        assert_eq!(
            events,
            vec![WebhookEvent::Message {
                source: EventSource::Group {
                    group_id: "C1".into(),
                    user_id: Some("U1".into()),
                },
                reply_token: Some("r1".into()),
                message: EventMessage::Text {
                    text: "!สร้างบิล".into()
                },
            }]
        );
        let WebhookEvent::Message { source, .. } = &events[0] else {
            unreachable!()
        };
        assert_eq!(source.chat(), Some((ChatType::Group, "C1")));
        assert_eq!(source.user_id(), Some("U1"));
    }

    #[test]
    fn test_parse_join_postback_and_unknown() {
        let events = parse_events(&body(&json!([
            { "type": "join", "source": { "type": "room", "roomId": "R1" } },
            { "type": "unfollow", "source": { "type": "user", "userId": "U1" } },
            {
                "type": "postback",
                "replyToken": "r2",
                "source": { "type": "user", "userId": "U2" },
                "postback": { "data": "action=mark_paid" }
            },
            { "type": "message", "source": { "type": "user", "userId": "U3" }, "message": { "type": "sticker" } }
        ])));

        let kinds: Vec<_> = events.iter().map(WebhookEvent::kind).collect();
        assert_eq!(kinds, vec!["join", "other", "postback", "message"]);
    }

    #[test]
    fn test_bad_event_does_not_drop_others() {
        let events = parse_events(&body(&json!([
            { "type": "join" },
            { "type": "follow", "source": { "type": "user", "userId": "U1" } }
        ])));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), "follow");
    }

    #[test]
    fn test_empty_or_invalid_body() {
        assert!(parse_events(b"").is_empty());
        assert!(parse_events(b"not json").is_empty());
        assert!(parse_events(b"{}").is_empty());
    }
}

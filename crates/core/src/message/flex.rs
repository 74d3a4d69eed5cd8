//! LINE message model.
//!
//! Only the subset of the Flex Message schema the bot renders is modelled.
//! Optional properties are omitted from the JSON when unset.

use serde::{Deserialize, Serialize};

/// A message sent through the Messaging API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Message {
    /// Plain text message.
    Text {
        /// Message text.
        text: String,
    },
    /// Flex message.
    Flex {
        /// Text shown in notifications and chat lists.
        alt_text: String,
        /// Message layout.
        contents: FlexContainer,
    },
}

impl Message {
    /// Creates a text message.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Top-level Flex container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexContainer {
    /// Single bubble.
    Bubble(Bubble),
}

/// A bubble with optional header, body and footer blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bubble {
    /// Header block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<FlexBox>,
    /// Body block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<FlexBox>,
    /// Footer block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FlexBox>,
}

/// A Flex component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexComponent {
    /// Layout box.
    Box(FlexBox),
    /// Text.
    Text(FlexText),
    /// Horizontal rule.
    Separator(FlexSeparator),
    /// Button.
    Button(FlexButton),
}

/// Box layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Stack children vertically.
    Vertical,
    /// Place children side by side.
    Horizontal,
    /// Side by side, aligned on the text baseline.
    Baseline,
}

/// Layout box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexBox {
    /// Layout direction.
    pub layout: Layout,
    /// Child components.
    pub contents: Vec<FlexComponent>,
    /// Space between children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    /// Space before this box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
}

impl FlexBox {
    /// Creates a vertical box.
    #[must_use]
    pub fn vertical(contents: Vec<FlexComponent>) -> Self {
        Self::new(Layout::Vertical, contents)
    }

    /// Creates a baseline box.
    #[must_use]
    pub fn baseline(contents: Vec<FlexComponent>) -> Self {
        Self::new(Layout::Baseline, contents)
    }

    fn new(layout: Layout, contents: Vec<FlexComponent>) -> Self {
        Self {
            layout,
            contents,
            spacing: None,
            margin: None,
        }
    }

    /// Sets the spacing between children.
    #[must_use]
    pub fn spacing(mut self, spacing: &str) -> Self {
        self.spacing = Some(spacing.to_string());
        self
    }

    /// Wraps the box as a component.
    #[must_use]
    pub fn component(self) -> FlexComponent {
        FlexComponent::Box(self)
    }
}

/// Text component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexText {
    /// Text content.
    pub text: String,
    /// Font size keyword (`xs`, `sm`, `md`, `lg`, `xl`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Font weight (`regular`, `bold`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Hex color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Whether long text wraps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    /// Space before this component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    /// Horizontal alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    /// Flex ratio inside a horizontal/baseline box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
}

impl FlexText {
    /// Creates a text component.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn size(mut self, size: &str) -> Self {
        self.size = Some(size.to_string());
        self
    }

    /// Renders the text in bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.weight = Some("bold".to_string());
        self
    }

    /// Sets the text color.
    #[must_use]
    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Enables wrapping.
    #[must_use]
    pub fn wrap(mut self) -> Self {
        self.wrap = Some(true);
        self
    }

    /// Sets the margin.
    #[must_use]
    pub fn margin(mut self, margin: &str) -> Self {
        self.margin = Some(margin.to_string());
        self
    }

    /// Sets the alignment.
    #[must_use]
    pub fn align(mut self, align: &str) -> Self {
        self.align = Some(align.to_string());
        self
    }

    /// Sets the flex ratio.
    #[must_use]
    pub fn flex(mut self, flex: u32) -> Self {
        self.flex = Some(flex);
        self
    }

    /// Wraps the text as a component.
    #[must_use]
    pub fn component(self) -> FlexComponent {
        FlexComponent::Text(self)
    }
}

/// Separator component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexSeparator {
    /// Space before the separator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
}

impl FlexSeparator {
    /// Creates a separator component with the given margin.
    #[must_use]
    pub fn with_margin(margin: &str) -> FlexComponent {
        FlexComponent::Separator(Self {
            margin: Some(margin.to_string()),
        })
    }
}

/// Button component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexButton {
    /// Tap action.
    pub action: Action,
    /// Button style (`primary`, `secondary`, `link`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Button height (`sm`, `md`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl FlexButton {
    /// Creates a small primary button.
    #[must_use]
    pub fn primary(action: Action) -> FlexComponent {
        FlexComponent::Button(Self {
            action,
            style: Some("primary".to_string()),
            height: Some("sm".to_string()),
        })
    }
}

/// Action triggered by a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Sends a postback event to the webhook.
    Postback {
        /// Button label.
        label: String,
        /// Data delivered with the postback event.
        data: String,
    },
    /// Opens a URI.
    Uri {
        /// Button label.
        label: String,
        /// Target URI.
        uri: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_json() {
        let value = serde_json::to_value(Message::text("hello")).unwrap();
        assert_eq!(value, json!({ "type": "text", "text": "hello" }));
    }

    #[test]
    fn test_flex_message_json_shape() {
        let message = Message::Flex {
            alt_text: "alt".into(),
            contents: FlexContainer::Bubble(Bubble {
                body: Some(FlexBox::vertical(vec![
                    FlexText::new("title").size("xl").bold().wrap().component(),
                    FlexSeparator::with_margin("lg"),
                ])),
                footer: Some(FlexBox::vertical(vec![FlexButton::primary(
                    Action::Postback {
                        label: "pay".into(),
                        data: "action=mark_paid".into(),
                    },
                )])),
                ..Bubble::default()
            }),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "flex",
                "altText": "alt",
                "contents": {
                    "type": "bubble",
                    "body": {
                        "type": "box",
                        "layout": "vertical",
                        "contents": [
                            { "type": "text", "text": "title", "size": "xl", "weight": "bold", "wrap": true },
                            { "type": "separator", "margin": "lg" }
                        ]
                    },
                    "footer": {
                        "type": "box",
                        "layout": "vertical",
                        "contents": [{
                            "type": "button",
                            "action": { "type": "postback", "label": "pay", "data": "action=mark_paid" },
                            "style": "primary",
                            "height": "sm"
                        }]
                    }
                }
            })
        );

        let parsed: Message = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, message);
    }
}

//! Chat commands and postback actions understood by the bot.

use uuid::Uuid;

/// Text commands that open the create-bill form.
const CREATE_BILL_COMMANDS: [&str; 4] = ["!สร้างบิล", "สร้างบิล", "!bill", "bill"];

/// Prefixes that also count as the create-bill command.
const CREATE_BILL_PREFIXES: [&str; 2] = ["!สร้างบิล", "สร้างบิล"];

/// Returns true if a chat message asks for the create-bill form.
///
/// Matching ignores whitespace anywhere in the text and ASCII case.
#[must_use]
pub fn is_create_bill_command(text: &str) -> bool {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    CREATE_BILL_COMMANDS.contains(&normalized.as_str())
        || CREATE_BILL_PREFIXES
            .iter()
            .any(|prefix| normalized.starts_with(prefix))
}

/// Action carried in a postback button's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostbackAction {
    /// The tapping user paid their share of a bill.
    MarkPaid {
        /// Bill being paid.
        bill_id: Uuid,
    },
}

impl PostbackAction {
    /// Parses `action=<name>&bill_id=<uuid>` postback data.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        let mut action = None;
        let mut bill_id = None;

        for pair in data.split('&') {
            match pair.split_once('=') {
                Some(("action", value)) => action = Some(value),
                Some(("bill_id", value)) => bill_id = Uuid::parse_str(value).ok(),
                _ => {}
            }
        }

        match action? {
            "mark_paid" => Some(Self::MarkPaid { bill_id: bill_id? }),
            _ => None,
        }
    }

    /// Encodes the action as postback data.
    #[must_use]
    pub fn to_data(self) -> String {
        match self {
            Self::MarkPaid { bill_id } => format!("action=mark_paid&bill_id={bill_id}"),
        }
    }
}

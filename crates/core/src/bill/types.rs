//! Bill data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of LINE chat a bill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    /// A LINE group (ids start with `C`).
    Group,
    /// A multi-person chat room (ids start with `R`).
    Room,
}

impl ChatType {
    /// First character every chat id of this type starts with.
    #[must_use]
    pub const fn id_prefix(self) -> char {
        match self {
            Self::Group => 'C',
            Self::Room => 'R',
        }
    }

    /// Path segment used by the Messaging API (`group` / `room`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Room => "room",
        }
    }
}

impl std::fmt::Display for ChatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group" => Ok(Self::Group),
            "room" => Ok(Self::Room),
            _ => Err(format!("Unknown chat type: {s}")),
        }
    }
}

/// A validated chat reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRef {
    /// LINE group or room id.
    pub chat_id: String,
    /// Chat kind.
    pub chat_type: ChatType,
}

/// Lifecycle of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// Accepting payments.
    Open,
    /// Cancelled by a chat member.
    Cancelled,
}

/// Payment state of one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    /// Share not paid yet.
    Pending,
    /// Participant marked the share as paid.
    Paid,
    /// The bill was cancelled.
    Cancelled,
}

/// A participant selected for a new bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInput {
    /// LINE user id.
    pub user_id: String,
    /// Display name shown in the summary.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A participant with the share they owe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantShare {
    /// LINE user id.
    pub user_id: String,
    /// Display name shown in the summary.
    pub display_name: Option<String>,
    /// Amount owed, two decimals.
    #[serde(with = "rust_decimal::serde::str")]
    pub share: Decimal,
}

/// Bank account transfers should be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    /// Account number (digits, dashes and spaces).
    pub account_number: String,
    /// Account holder name.
    pub account_name: Option<String>,
    /// Bank name.
    pub bank_name: Option<String>,
}

/// Validated input for creating a bill.
#[derive(Debug, Clone)]
pub struct NewBill {
    /// Chat the bill is posted to.
    pub chat: ChatRef,
    /// Bill title.
    pub title: String,
    /// Bill total.
    pub total: Decimal,
    /// Optional cash rounding step.
    pub rounding_step: Option<Decimal>,
    /// Participants in display order.
    pub participants: Vec<ParticipantInput>,
}

/// Shares computed for a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// One share per participant, in participant order.
    pub shares: Vec<ParticipantShare>,
    /// Note shown under the total when rounding needed a correction.
    pub rounding_note: Option<String>,
}

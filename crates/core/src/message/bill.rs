//! Bill messages posted to chats.

use billsplit_shared::types::format_baht;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::bill::{BankAccount, ParticipantStatus, PostbackAction};

use super::flex::{
    Action, Bubble, FlexBox, FlexButton, FlexComponent, FlexContainer, FlexSeparator, FlexText,
    Message,
};

/// Participant rows rendered when the caller does not say otherwise.
pub const DEFAULT_MAX_PARTICIPANT_ROWS: usize = 12;

const MUTED: &str = "#888888";
const INK: &str = "#1F1F1F";
const SHARE_INK: &str = "#4A4A4A";
const BRAND_GREEN: &str = "#1DB446";

/// One participant row of the bill summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSummary {
    /// Display name, if known.
    pub display_name: Option<String>,
    /// Amount owed.
    pub share: Decimal,
    /// Payment state, if tracked.
    pub status: Option<ParticipantStatus>,
}

/// Everything the bill summary message shows.
#[derive(Debug, Clone)]
pub struct BillSummary<'a> {
    /// Bill id, used in the mark-paid postback.
    pub bill_id: Uuid,
    /// Bill title.
    pub title: &'a str,
    /// Bill total.
    pub amount: Decimal,
    /// Name of the member who created the bill.
    pub creator_name: Option<&'a str>,
    /// Participants in display order.
    pub participants: &'a [ParticipantSummary],
    /// Account transfers go to.
    pub bank_account: Option<&'a BankAccount>,
    /// Rounding explanation shown under the creator line.
    pub rounding_note: Option<&'a str>,
    /// Maximum participant rows to render.
    pub max_participant_rows: usize,
}

/// Builds the bill summary Flex message.
#[must_use]
pub fn create_bill_flex_message(summary: &BillSummary<'_>) -> Message {
    let creator = summary
        .creator_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("-");

    let mut components = vec![
        FlexText::new(summary.title).size("xl").bold().wrap().component(),
        FlexText::new(format!("ยอดรวม {} บาท", format_baht(summary.amount)))
            .size("lg")
            .component(),
        FlexText::new(format!("สร้างโดย: {creator}"))
            .size("sm")
            .color(MUTED)
            .margin("md")
            .component(),
    ];

    if let Some(note) = summary.rounding_note.filter(|note| !note.is_empty()) {
        components.push(FlexText::new(note).size("xs").color(MUTED).wrap().component());
    }

    components.push(FlexSeparator::with_margin("lg"));
    components.push(
        FlexText::new("คนที่ต้องหาร")
            .margin("lg")
            .bold()
            .size("sm")
            .component(),
    );
    components.push(participants_section(
        summary.participants,
        summary.max_participant_rows,
    ));
    components.extend(bank_account_section(summary.bank_account));

    let mark_paid = PostbackAction::MarkPaid {
        bill_id: summary.bill_id,
    };

    Message::Flex {
        alt_text: format!("บิลใหม่: {}", summary.title),
        contents: FlexContainer::Bubble(Bubble {
            header: Some(FlexBox::vertical(vec![
                FlexText::new("🧾 บิลใหม่!")
                    .bold()
                    .color(BRAND_GREEN)
                    .size("lg")
                    .component(),
            ])),
            body: Some(FlexBox::vertical(components).spacing("md")),
            footer: Some(
                FlexBox::vertical(vec![FlexButton::primary(Action::Postback {
                    label: "✅ ฉันจ่ายแล้ว".to_string(),
                    data: mark_paid.to_data(),
                })])
                .spacing("sm"),
            ),
        }),
    }
}

fn participants_section(participants: &[ParticipantSummary], max_rows: usize) -> FlexComponent {
    if participants.is_empty() {
        return FlexBox::vertical(vec![
            FlexText::new("(ยังไม่มีคนเข้าร่วมหาร)")
                .color(MUTED)
                .size("sm")
                .component(),
        ])
        .component();
    }

    let rows = participants
        .iter()
        .take(max_rows)
        .map(|participant| {
            let name = participant
                .display_name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or("ไม่ทราบชื่อ");

            FlexBox::baseline(vec![
                FlexText::new(name)
                    .size("sm")
                    .color(INK)
                    .wrap()
                    .flex(4)
                    .component(),
                FlexText::new(format!("{} บาท", format_baht(participant.share)))
                    .size("sm")
                    .color(SHARE_INK)
                    .align("end")
                    .flex(3)
                    .component(),
            ])
            .spacing("sm")
            .component()
        })
        .collect();

    FlexBox::vertical(rows).spacing("sm").component()
}

fn bank_account_section(account: Option<&BankAccount>) -> Vec<FlexComponent> {
    let Some(account) = account.filter(|a| !a.account_number.is_empty()) else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(3);
    if let Some(bank_name) = account.bank_name.as_deref().filter(|v| !v.is_empty()) {
        lines.push(bank_name.to_string());
    }
    if let Some(account_name) = account.account_name.as_deref().filter(|v| !v.is_empty()) {
        lines.push(format!("ชื่อบัญชี: {account_name}"));
    }
    lines.push(format!("เลขบัญชี: {}", account.account_number));

    vec![
        FlexSeparator::with_margin("md"),
        FlexText::new("บัญชีสำหรับโอน")
            .bold()
            .size("sm")
            .margin("md")
            .component(),
        FlexBox::vertical(
            lines
                .into_iter()
                .map(|line| FlexText::new(line).size("sm").color(INK).wrap().component())
                .collect(),
        )
        .spacing("sm")
        .component(),
    ]
}

/// Builds the bubble that opens the create-bill LIFF form.
#[must_use]
pub fn create_bill_button(liff_id: Option<&str>) -> Message {
    let uri = liff_id
        .filter(|id| !id.is_empty())
        .map_or_else(|| "https://line.me".to_string(), |id| format!("line://app/{id}"));

    Message::Flex {
        alt_text: "สร้างบิลใหม่".to_string(),
        contents: FlexContainer::Bubble(Bubble {
            header: None,
            body: Some(
                FlexBox::vertical(vec![
                    FlexText::new("AKizz Bill Bot").bold().size("xl").component(),
                    FlexText::new("กดปุ่มด้านล่างเพื่อเปิดฟอร์มสำหรับสร้างบิลและหารบิลในกลุ่มครับ")
                        .wrap()
                        .component(),
                ])
                .spacing("md"),
            ),
            footer: Some(FlexBox::vertical(vec![FlexButton::primary(Action::Uri {
                label: "📝 สร้างบิลใหม่".to_string(),
                uri,
            })])),
        }),
    }
}

/// Text pushed to the chat when a bill is cancelled.
#[must_use]
pub fn bill_cancelled_message(title: &str, cancelled_by: Option<&str>) -> Message {
    let who = cancelled_by
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("สมาชิกในกลุ่ม");
    Message::text(format!("บิล \"{title}\" ถูกยกเลิกโดย {who}"))
}

/// Why a mark-paid postback could not be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentRejection {
    /// The bill does not exist.
    BillNotFound,
    /// The bill was cancelled.
    BillCancelled,
    /// The tapping user has no share in the bill.
    NotParticipant,
}

/// Reply to a successful mark-paid postback.
#[must_use]
pub fn bill_paid_message(title: &str, payer: Option<&str>, already_paid: bool) -> Message {
    let who = payer
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("สมาชิกในกลุ่ม");
    if already_paid {
        Message::text(format!("{who} จ่ายบิล \"{title}\" ไปแล้ว"))
    } else {
        Message::text(format!("✅ {who} จ่ายบิล \"{title}\" แล้ว"))
    }
}

/// Reply to a mark-paid postback that was rejected.
#[must_use]
pub fn payment_rejected_message(reason: PaymentRejection) -> Message {
    Message::text(match reason {
        PaymentRejection::BillNotFound => "ไม่พบบิลนี้",
        PaymentRejection::BillCancelled => "บิลนี้ถูกยกเลิกแล้ว",
        PaymentRejection::NotParticipant => "คุณไม่ได้อยู่ในรายชื่อคนที่ต้องหารบิลนี้",
    })
}

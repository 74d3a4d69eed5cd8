//! Bill validation errors.
//!
//! Messages are shown to chat members as-is.

use billsplit_shared::AppError;
use thiserror::Error;

use super::types::ChatType;

/// Reasons a bill request is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillValidationError {
    /// No chat id in the request.
    #[error("ไม่พบรหัสแชทจาก LINE")]
    MissingChatId,

    /// Chat type missing or not `group` / `room`.
    #[error("ไม่พบประเภทแชทจาก LINE")]
    MissingChatType,

    /// Chat id does not match the chat type prefix.
    #[error("{}", chat_id_mismatch_message(.0))]
    ChatIdMismatch(ChatType),

    /// No bill id in a cancel request.
    #[error("ไม่พบบิลที่ต้องการยกเลิก")]
    MissingBillId,

    /// Bill belongs to another chat.
    #[error("ไม่พบบิลในกลุ่มนี้")]
    BillNotInChat,

    /// Bill title is blank.
    #[error("กรุณาระบุชื่อบิล")]
    MissingTitle,

    /// Amount is missing, not positive, or too large to store.
    #[error("ยอดรวมต้องมากกว่า 0 และไม่เกิน 999,999,999,999.99")]
    InvalidAmount,

    /// No participants selected.
    #[error("กรุณาเลือกผู้ร่วมหารอย่างน้อย 1 คน")]
    NoParticipants,

    /// Participant without a user id.
    #[error("ไม่พบรหัสผู้ใช้ของผู้ร่วมหาร")]
    InvalidParticipant,

    /// Same user selected twice.
    #[error("มีผู้ร่วมหารซ้ำกัน: {0}")]
    DuplicateParticipant(String),

    /// Allocation returned fewer shares than participants.
    #[error("ไม่สามารถคำนวณยอดหารได้")]
    AllocationFailed,

    /// Account number is blank.
    #[error("กรุณากรอกเลขบัญชีธนาคาร")]
    MissingAccountNumber,

    /// Account number has characters other than digits, dashes or spaces.
    #[error("รูปแบบเลขบัญชีไม่ถูกต้อง")]
    InvalidAccountNumber,
}

fn chat_id_mismatch_message(chat_type: &ChatType) -> &'static str {
    match chat_type {
        ChatType::Group => "ไม่สามารถอ่านรหัสกลุ่ม LINE ได้ กรุณาเปิด LIFF จากกลุ่มอีกครั้ง",
        ChatType::Room => {
            "ไม่สามารถอ่านรหัสห้อง LINE ได้ กรุณาเปิด LIFF จากห้องสนทนาอีกครั้ง"
        }
    }
}

impl From<BillValidationError> for AppError {
    fn from(err: BillValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

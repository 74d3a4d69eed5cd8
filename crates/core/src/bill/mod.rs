//! Bill domain: chat references, validation, share planning and commands.

pub mod command;
pub mod error;
pub mod split;
pub mod types;
pub mod validation;

pub use command::{PostbackAction, is_create_bill_command};
pub use error::BillValidationError;
pub use split::{plan_split, rounding_note};
pub use types::{
    BankAccount, BillStatus, ChatRef, ChatType, NewBill, ParticipantInput, ParticipantShare,
    ParticipantStatus, SplitPlan,
};
pub use validation::{
    is_valid_account_number, validate_bank_account, validate_cancel, validate_chat,
    validate_new_bill,
};

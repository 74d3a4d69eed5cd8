//! Messages the bot sends to LINE chats.

pub mod bill;
pub mod flex;

pub use bill::{
    BillSummary, DEFAULT_MAX_PARTICIPANT_ROWS, ParticipantSummary, PaymentRejection,
    bill_cancelled_message, bill_paid_message, create_bill_button, create_bill_flex_message,
    payment_rejected_message,
};
pub use flex::{Action, Bubble, FlexBox, FlexButton, FlexComponent, FlexContainer, Message};

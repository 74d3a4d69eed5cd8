//! Request validation for bill endpoints.
//!
//! Checks run in a fixed order so the first failing rule decides the
//! message a chat member sees.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::error::BillValidationError;
use super::types::{BankAccount, ChatRef, ChatType, NewBill, ParticipantInput};

/// Exclusive upper bound, in baht, for stored amounts (`numeric(14, 2)`).
const AMOUNT_LIMIT_BAHT: i64 = 1_000_000_000_000;

/// Validates a chat id / chat type pair.
///
/// # Errors
///
/// Returns an error if either value is missing or the id does not carry the
/// prefix of its chat type.
pub fn validate_chat(
    chat_id: Option<&str>,
    chat_type: Option<&str>,
) -> Result<ChatRef, BillValidationError> {
    let chat = require_chat(chat_id, chat_type)?;
    check_chat_prefix(&chat)?;
    Ok(chat)
}

/// Validates a cancel request and returns the trimmed bill id with its chat.
///
/// # Errors
///
/// Returns an error if the bill id is blank or the chat is invalid.
pub fn validate_cancel(
    bill_id: Option<&str>,
    chat_id: Option<&str>,
    chat_type: Option<&str>,
) -> Result<(String, ChatRef), BillValidationError> {
    let bill_id = non_blank(bill_id).ok_or(BillValidationError::MissingBillId)?;
    let chat = validate_chat(chat_id, chat_type)?;
    Ok((bill_id, chat))
}

/// Validates a bank account update.
///
/// Blank bank and account names become `None`.
///
/// # Errors
///
/// Returns an error if the chat is invalid or the account number is blank or
/// malformed.
pub fn validate_bank_account(
    chat_id: Option<&str>,
    chat_type: Option<&str>,
    account_number: Option<&str>,
    bank_name: Option<&str>,
    account_name: Option<&str>,
) -> Result<(ChatRef, BankAccount), BillValidationError> {
    let chat = require_chat(chat_id, chat_type)?;
    let account_number =
        non_blank(account_number).ok_or(BillValidationError::MissingAccountNumber)?;
    check_chat_prefix(&chat)?;

    if !is_valid_account_number(&account_number) {
        return Err(BillValidationError::InvalidAccountNumber);
    }

    Ok((
        chat,
        BankAccount {
            account_number,
            account_name: non_blank(account_name),
            bank_name: non_blank(bank_name),
        },
    ))
}

/// Validates a create-bill request.
///
/// # Errors
///
/// Returns an error for an invalid chat, a blank title, an amount outside
/// `(0, 1e12)`, or an empty / duplicated participant list. A rounding step
/// outside that range is dropped.
pub fn validate_new_bill(
    chat_id: Option<&str>,
    chat_type: Option<&str>,
    title: Option<&str>,
    amount: Option<Decimal>,
    rounding_step: Option<Decimal>,
    participants: Vec<ParticipantInput>,
) -> Result<NewBill, BillValidationError> {
    let chat = validate_chat(chat_id, chat_type)?;
    let title = non_blank(title).ok_or(BillValidationError::MissingTitle)?;

    let total = amount
        .filter(|a| in_amount_range(*a))
        .ok_or(BillValidationError::InvalidAmount)?;

    if participants.is_empty() {
        return Err(BillValidationError::NoParticipants);
    }

    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(participants.len());
    for participant in participants {
        let user_id = participant.user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(BillValidationError::InvalidParticipant);
        }
        if !seen.insert(user_id.clone()) {
            return Err(BillValidationError::DuplicateParticipant(user_id));
        }
        cleaned.push(ParticipantInput {
            user_id,
            display_name: participant.display_name,
        });
    }

    Ok(NewBill {
        chat,
        title,
        total,
        rounding_step: rounding_step.filter(|s| in_amount_range(*s)),
        participants: cleaned,
    })
}

/// Account numbers may only contain digits, dashes and spaces.
#[must_use]
pub fn is_valid_account_number(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-' || c == ' ')
}

fn in_amount_range(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount < Decimal::from(AMOUNT_LIMIT_BAHT)
}

fn require_chat(
    chat_id: Option<&str>,
    chat_type: Option<&str>,
) -> Result<ChatRef, BillValidationError> {
    let chat_id = non_blank(chat_id).ok_or(BillValidationError::MissingChatId)?;
    let chat_type = chat_type
        .and_then(|t| t.parse::<ChatType>().ok())
        .ok_or(BillValidationError::MissingChatType)?;
    Ok(ChatRef { chat_id, chat_type })
}

fn check_chat_prefix(chat: &ChatRef) -> Result<(), BillValidationError> {
    let matches = chat
        .chat_id
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&chat.chat_type.id_prefix()));

    if matches {
        Ok(())
    } else {
        Err(BillValidationError::ChatIdMismatch(chat.chat_type))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn participant(id: &str) -> ParticipantInput {
        ParticipantInput {
            user_id: id.to_string(),
            display_name: None,
        }
    }

    #[rstest]
    #[case(Some("C123"), Some("group"), Ok(ChatType::Group))]
    #[case(Some("c123"), Some("group"), Ok(ChatType::Group))]
    #[case(Some("R999"), Some("room"), Ok(ChatType::Room))]
    #[case(None, Some("group"), Err(BillValidationError::MissingChatId))]
    #[case(Some("  "), Some("group"), Err(BillValidationError::MissingChatId))]
    #[case(Some("C123"), None, Err(BillValidationError::MissingChatType))]
    #[case(Some("C123"), Some("user"), Err(BillValidationError::MissingChatType))]
    #[case(Some("R123"), Some("group"), Err(BillValidationError::ChatIdMismatch(ChatType::Group)))]
    #[case(Some("C123"), Some("room"), Err(BillValidationError::ChatIdMismatch(ChatType::Room)))]
    fn test_validate_chat(
        #[case] chat_id: Option<&str>,
        #[case] chat_type: Option<&str>,
        #[case] expected: Result<ChatType, BillValidationError>,
    ) {
        let result = validate_chat(chat_id, chat_type).map(|chat| chat.chat_type);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_chat_id_mismatch_messages() {
        assert!(
            BillValidationError::ChatIdMismatch(ChatType::Group)
                .to_string()
                .contains("รหัสกลุ่ม")
        );
        assert!(
            BillValidationError::ChatIdMismatch(ChatType::Room)
                .to_string()
                .contains("รหัสห้อง")
        );
    }

    #[test]
    fn test_validate_cancel() {
        let (bill_id, chat) = validate_cancel(Some(" abc "), Some("C1"), Some("group")).unwrap();
        assert_eq!(bill_id, "abc");
        assert_eq!(chat.chat_id, "C1");

        assert_eq!(
            validate_cancel(Some(""), Some("C1"), Some("group")),
            Err(BillValidationError::MissingBillId)
        );
    }

    #[rstest]
    #[case("123-4-56789-0", true)]
    #[case("123 456 7890", true)]
    #[case("12a34", false)]
    #[case("", false)]
    fn test_account_number_format(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(is_valid_account_number(value), valid);
    }

    #[test]
    fn test_validate_bank_account_blank_names_become_none() {
        let (chat, account) = validate_bank_account(
            Some("C1"),
            Some("group"),
            Some(" 123-456 "),
            Some("  "),
            Some("Somchai"),
        )
        .unwrap();

        assert_eq!(chat.chat_type, ChatType::Group);
        assert_eq!(account.account_number, "123-456");
        assert_eq!(account.bank_name, None);
        assert_eq!(account.account_name.as_deref(), Some("Somchai"));
    }

    #[test]
    fn test_validate_bank_account_order() {
        // Missing account number wins over a mismatched prefix.
        assert_eq!(
            validate_bank_account(Some("R1"), Some("group"), None, None, None),
            Err(BillValidationError::MissingAccountNumber)
        );
        assert_eq!(
            validate_bank_account(Some("C1"), Some("group"), Some("12ab"), None, None),
            Err(BillValidationError::InvalidAccountNumber)
        );
    }

    #[test]
    fn test_validate_new_bill() {
        let bill = validate_new_bill(
            Some("C1"),
            Some("group"),
            Some(" Dinner "),
            Some(dec!(100)),
            Some(dec!(0)),
            vec![participant("U1"), participant(" U2 ")],
        )
        .unwrap();

        assert_eq!(bill.title, "Dinner");
        assert_eq!(bill.total, dec!(100));
        assert_eq!(bill.rounding_step, None);
        assert_eq!(bill.participants[1].user_id, "U2");
    }

    #[test]
    fn test_validate_new_bill_amount_limit() {
        let bill = validate_new_bill(
            Some("C1"),
            Some("group"),
            Some("Condo"),
            Some(dec!(999999999999.99)),
            Some(dec!(1000000000000)),
            vec![participant("U1")],
        )
        .unwrap();

        assert_eq!(bill.total, dec!(999999999999.99));
        assert_eq!(bill.rounding_step, None);
    }

    #[rstest]
    #[case(Some("  "), Some(dec!(10)), vec![participant("U1")], BillValidationError::MissingTitle)]
    #[case(Some("t"), None, vec![participant("U1")], BillValidationError::InvalidAmount)]
    #[case(Some("t"), Some(dec!(0)), vec![participant("U1")], BillValidationError::InvalidAmount)]
    #[case(Some("t"), Some(dec!(1000000000000)), vec![participant("U1")], BillValidationError::InvalidAmount)]
    #[case(Some("t"), Some(dec!(10)), vec![], BillValidationError::NoParticipants)]
    #[case(Some("t"), Some(dec!(10)), vec![participant(" ")], BillValidationError::InvalidParticipant)]
    #[case(
        Some("t"),
        Some(dec!(10)),
        vec![participant("U1"), participant("U1")],
        BillValidationError::DuplicateParticipant("U1".into())
    )]
    fn test_validate_new_bill_errors(
        #[case] title: Option<&str>,
        #[case] amount: Option<Decimal>,
        #[case] participants: Vec<ParticipantInput>,
        #[case] expected: BillValidationError,
    ) {
        let result = validate_new_bill(
            Some("C1"),
            Some("group"),
            title,
            amount,
            None,
            participants,
        );
        assert_eq!(result.unwrap_err(), expected);
    }
}

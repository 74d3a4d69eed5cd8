//! Turns a validated bill into per-participant shares.

use billsplit_shared::Cents;

use crate::allocation::{Allocation, ShareAllocator};

use super::error::BillValidationError;
use super::types::{NewBill, ParticipantShare, SplitPlan};

/// Computes every participant's share for a bill.
///
/// # Errors
///
/// Returns `AllocationFailed` when the allocator does not produce exactly one
/// share per participant or the shares do not add up to the total.
pub fn plan_split(bill: &NewBill) -> Result<SplitPlan, BillValidationError> {
    let allocation =
        ShareAllocator::allocate_detailed(bill.total, bill.participants.len(), bill.rounding_step)
            .ok_or(BillValidationError::AllocationFailed)?;

    if allocation.shares().len() != bill.participants.len()
        || allocation.shares().iter().copied().sum::<Cents>() != allocation.total()
    {
        return Err(BillValidationError::AllocationFailed);
    }

    let shares = bill
        .participants
        .iter()
        .zip(allocation.to_decimals())
        .map(|(participant, share)| ParticipantShare {
            user_id: participant.user_id.clone(),
            display_name: participant.display_name.clone(),
            share,
        })
        .collect();

    Ok(SplitPlan {
        shares,
        rounding_note: rounding_note(&allocation),
    })
}

/// Note explaining why shares are not all multiples of the rounding step.
///
/// `None` when no step was requested or every share already lands on a step.
#[must_use]
pub fn rounding_note(allocation: &Allocation) -> Option<String> {
    let step = allocation.step()?;
    if allocation.is_step_aligned() {
        return None;
    }

    let mut note = format!("ปัดเศษทีละ {step} บาท และปรับยอดให้ตรงกับยอดรวมของบิล");
    if allocation.fallback_applied() {
        note.push_str(" (ส่วนต่างที่เหลือหักจากคนสุดท้าย)");
    }
    Some(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::types::{ChatRef, ChatType, ParticipantInput};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn bill(total: Decimal, step: Option<Decimal>, count: usize) -> NewBill {
        NewBill {
            chat: ChatRef {
                chat_id: "C1".into(),
                chat_type: ChatType::Group,
            },
            title: "Lunch".into(),
            total,
            rounding_step: step,
            participants: (0..count)
                .map(|i| ParticipantInput {
                    user_id: format!("U{i}"),
                    display_name: Some(format!("Member {i}")),
                })
                .collect(),
        }
    }

    #[test]
    fn test_plan_split_assigns_in_order() {
        let plan = plan_split(&bill(dec!(100), None, 3)).unwrap();

        let shares: Vec<_> = plan.shares.iter().map(|s| s.share).collect();
        assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
        assert_eq!(plan.shares[0].user_id, "U0");
        assert_eq!(plan.shares[2].display_name.as_deref(), Some("Member 2"));
        assert_eq!(plan.rounding_note, None);
    }

    #[test]
    fn test_plan_split_notes_corrected_rounding() {
        let plan = plan_split(&bill(dec!(100), Some(dec!(5)), 3)).unwrap();
        let note = plan.rounding_note.unwrap();
        assert!(note.contains("5.00"));
    }

    #[test]
    fn test_plan_split_aligned_rounding_has_no_note() {
        let plan = plan_split(&bill(dec!(300), Some(dec!(5)), 3)).unwrap();
        assert_eq!(plan.rounding_note, None);
    }

    #[test]
    fn test_plan_split_huge_step_falls_back_to_even_split() {
        let plan = plan_split(&bill(dec!(100.00), Some(dec!(50000000000000000)), 3)).unwrap();
        let shares: Vec<_> = plan.shares.iter().map(|s| s.share).collect();
        assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
        assert!(plan.rounding_note.is_some());
    }

    #[test]
    fn test_plan_split_rejects_empty_bill() {
        assert_eq!(
            plan_split(&bill(dec!(100), None, 0)),
            Err(BillValidationError::AllocationFailed)
        );
    }
}

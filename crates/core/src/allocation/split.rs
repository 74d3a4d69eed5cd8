//! Exact-money share allocation.
//!
//! Splits a bill total across participants so that the shares always sum to
//! the bill total, optionally rounding every share up to a cash-friendly
//! step (for example the nearest 5 baht) and then clawing the rounding
//! surplus back.
//!
//! All arithmetic happens in integer cents. Decimals are only seen at the
//! boundary: the total and the step are converted with half-away-from-zero
//! rounding on entry and every share is converted back on exit.
//!
//! The algorithm:
//! 1. Convert the total to cents and split it evenly with integer division.
//! 2. Hand out the leftover cents one by one, starting at index 0. These are
//!    the base shares and they already sum to the total.
//! 3. With a step, round every share up to the next multiple of the step.
//! 4. Remove the resulting surplus walking from the last participant to the
//!    first: whole steps first, then a partial reduction that never goes
//!    below the participant's base share.
//! 5. Force whatever surplus is left onto the last share (clamped at zero).
//! 6. Reconcile any remaining difference on the last share.

use billsplit_shared::Cents;
use rust_decimal::Decimal;

/// Result of a successful allocation, in cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    total: Cents,
    base_shares: Vec<Cents>,
    shares: Vec<Cents>,
    step: Option<Cents>,
    fallback_applied: bool,
}

impl Allocation {
    /// The total that was split.
    #[must_use]
    pub const fn total(&self) -> Cents {
        self.total
    }

    /// Final shares in participant order.
    #[must_use]
    pub fn shares(&self) -> &[Cents] {
        &self.shares
    }

    /// Even split before any rounding was applied.
    #[must_use]
    pub fn base_shares(&self) -> &[Cents] {
        &self.base_shares
    }

    /// Effective rounding step in cents, if rounding was requested.
    #[must_use]
    pub const fn step(&self) -> Option<Cents> {
        self.step
    }

    /// Whether the leftover surplus had to be forced onto the last share,
    /// possibly pushing it below its base share.
    #[must_use]
    pub const fn fallback_applied(&self) -> bool {
        self.fallback_applied
    }

    /// Returns true if every share is a multiple of the rounding step.
    ///
    /// Always true when no step was requested.
    #[must_use]
    pub fn is_step_aligned(&self) -> bool {
        self.step.is_none_or(|step| {
            self.shares
                .iter()
                .all(|share| share.value() % step.value() == 0)
        })
    }

    /// Final shares as two-decimal amounts.
    #[must_use]
    pub fn to_decimals(&self) -> Vec<Decimal> {
        self.shares.iter().map(|share| share.to_decimal()).collect()
    }
}

/// Share allocation entry points.
pub struct ShareAllocator;

impl ShareAllocator {
    /// Splits `total` across `participant_count` participants.
    ///
    /// `rounding_step` values that are absent or not positive disable
    /// rounding. Invalid input (a non-positive total, zero participants, or
    /// amounts beyond the cents domain) yields an empty vector, so callers
    /// detect failure with `shares.len() != participant_count`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use billsplit_core::allocation::ShareAllocator;
    ///
    /// let shares = ShareAllocator::allocate(dec!(100), 3, None);
    /// assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
    /// ```
    #[must_use]
    pub fn allocate(
        total: Decimal,
        participant_count: usize,
        rounding_step: Option<Decimal>,
    ) -> Vec<Decimal> {
        Self::allocate_detailed(total, participant_count, rounding_step)
            .map(|allocation| allocation.to_decimals())
            .unwrap_or_default()
    }

    /// Same as [`ShareAllocator::allocate`] but keeps the cents breakdown.
    ///
    /// Returns `None` on invalid input.
    #[must_use]
    pub fn allocate_detailed(
        total: Decimal,
        participant_count: usize,
        rounding_step: Option<Decimal>,
    ) -> Option<Allocation> {
        if total <= Decimal::ZERO || participant_count == 0 {
            return None;
        }

        let total_cents = Cents::from_decimal(total)?;
        let step = match rounding_step.filter(|step| *step > Decimal::ZERO) {
            Some(step) => Some(Cents::from_decimal(step)?),
            None => None,
        };

        split(total_cents, participant_count, step)
    }

    /// Splits an amount that is already expressed in cents.
    ///
    /// Returns `None` when the total is not positive or there are no
    /// participants. A step of zero or less disables rounding.
    #[must_use]
    pub fn allocate_cents(
        total: Cents,
        participant_count: usize,
        rounding_step: Option<Cents>,
    ) -> Option<Allocation> {
        if !total.is_positive() || participant_count == 0 {
            return None;
        }
        split(
            total,
            participant_count,
            rounding_step.filter(|step| step.is_positive()),
        )
    }
}

/// Core split over a non-negative cents total.
///
/// Rounded-up shares can exceed the `i64` range when the step is large, so
/// the working values are `i128`. Final shares always sum to the total and
/// therefore fit back into `i64`.
fn split(total: Cents, participant_count: usize, step: Option<Cents>) -> Option<Allocation> {
    let total_cents = i128::from(total.value());
    let count = i128::try_from(participant_count).ok()?;

    let base = total_cents / count;
    let mut base_shares = vec![base; participant_count];

    // remainder is in [0, count)
    let remainder = usize::try_from(total_cents - base * count).ok()?;
    for share in base_shares.iter_mut().take(remainder) {
        *share += 1;
    }

    let mut shares = base_shares.clone();
    let mut fallback_applied = false;

    let step_cents = step.map(|s| s.value().max(1));
    if let Some(step) = step_cents.map(i128::from) {
        for share in &mut shares {
            *share = round_up_to_step(*share, step);
        }

        let mut surplus = shares.iter().sum::<i128>() - total_cents;

        if surplus > 0 {
            for i in (0..shares.len()).rev() {
                if surplus <= 0 {
                    break;
                }

                let min_allowed = base_shares[i].max(step);
                while shares[i] - step >= min_allowed && surplus >= step {
                    shares[i] -= step;
                    surplus -= step;
                }

                if surplus > 0 {
                    let reduction = surplus.min(shares[i] - base_shares[i]);
                    if reduction > 0 {
                        shares[i] -= reduction;
                        surplus -= reduction;
                    }
                }
            }

            if surplus > 0
                && let Some(last) = shares.last_mut()
            {
                *last = (*last - surplus).max(0);
                fallback_applied = true;
            }
        }
    }

    let difference = total_cents - shares.iter().sum::<i128>();
    if difference != 0
        && let Some(last) = shares.last_mut()
    {
        *last = (*last + difference).max(0);
    }

    Some(Allocation {
        total,
        base_shares: to_cents(&base_shares)?,
        shares: to_cents(&shares)?,
        step: step_cents.map(Cents::new),
        fallback_applied,
    })
}

/// Rounds a non-negative value up to the next multiple of `step`.
fn round_up_to_step(value: i128, step: i128) -> i128 {
    let rem = value % step;
    if rem == 0 { value } else { value + (step - rem) }
}

fn to_cents(values: &[i128]) -> Option<Vec<Cents>> {
    values
        .iter()
        .map(|v| i64::try_from(*v).ok().map(Cents::new))
        .collect()
}

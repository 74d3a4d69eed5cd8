//! Minor-unit money type.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts cross the API boundary as `rust_decimal::Decimal` and are
//! converted to whole cents (1/100 of a baht) for any arithmetic.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of minor units per major unit.
const CENTS_PER_UNIT: i64 = 100;

/// An amount expressed in integer minor units (cents / satang).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// Creates a cents amount from a raw minor-unit count.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Converts a decimal amount to cents, rounding half away from zero.
    ///
    /// Returns `None` when the amount does not fit the `i64` cents domain.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        amount
            .checked_mul(Decimal::from(CENTS_PER_UNIT))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
    }

    /// Converts back to a two-decimal amount.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the raw minor-unit count.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_baht(self.to_decimal()))
    }
}

impl std::iter::Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|c| c.0).sum())
    }
}

/// Formats an amount with exactly two decimal places (`1234.5` -> `"1234.50"`).
#[must_use]
pub fn format_baht(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

//! Property-based tests for share allocation.

use billsplit_shared::Cents;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::split::ShareAllocator;

/// Totals from 0.01 to 100,000,000.00.
fn total_cents() -> impl Strategy<Value = i64> {
    1i64..10_000_000_000i64
}

fn participant_count() -> impl Strategy<Value = usize> {
    1usize..60
}

/// Steps from 0.01 to 1,000.00.
fn step_cents() -> impl Strategy<Value = i64> {
    1i64..100_000i64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Shares always add back up to the total, with or without rounding.
    #[test]
    fn prop_conservation(
        total in total_cents(),
        count in participant_count(),
        step in proptest::option::of(step_cents()),
    ) {
        let allocation = ShareAllocator::allocate_cents(
            Cents::new(total),
            count,
            step.map(Cents::new),
        ).unwrap();

        prop_assert_eq!(allocation.shares().len(), count);
        prop_assert_eq!(allocation.shares().iter().copied().sum::<Cents>(), Cents::new(total));
        prop_assert!(allocation.shares().iter().all(|s| s.value() >= 0));
    }

    /// Decimal entry point agrees with the cents domain.
    #[test]
    fn prop_decimal_conservation(
        total in total_cents(),
        count in participant_count(),
    ) {
        let total = Decimal::new(total, 2);
        let shares = ShareAllocator::allocate(total, count, None);

        prop_assert_eq!(shares.len(), count);
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), total);
    }

    /// Without a step, shares differ by at most one cent and the extra
    /// cents sit at the lowest indices.
    #[test]
    fn prop_fair_baseline(
        total in total_cents(),
        count in participant_count(),
    ) {
        let allocation = ShareAllocator::allocate_cents(Cents::new(total), count, None).unwrap();
        let shares = allocation.shares();

        let max = shares.iter().max().unwrap().value();
        let min = shares.iter().min().unwrap().value();
        prop_assert!(max - min <= 1);
        prop_assert!(shares.windows(2).all(|w| w[0] >= w[1]));
    }

    /// The surplus pass never takes a share below its base share, so it
    /// always settles back on the even split.
    #[test]
    fn prop_rounding_settles_on_base_shares(
        total in total_cents(),
        count in participant_count(),
        step in step_cents(),
    ) {
        let rounded = ShareAllocator::allocate_cents(
            Cents::new(total),
            count,
            Some(Cents::new(step)),
        ).unwrap();

        prop_assert!(!rounded.fallback_applied());
        prop_assert_eq!(rounded.shares(), rounded.base_shares());
    }

    /// Same inputs, same output.
    #[test]
    fn prop_deterministic(
        total in total_cents(),
        count in participant_count(),
        step in proptest::option::of(step_cents()),
    ) {
        let first = ShareAllocator::allocate_cents(Cents::new(total), count, step.map(Cents::new));
        let second = ShareAllocator::allocate_cents(Cents::new(total), count, step.map(Cents::new));
        prop_assert_eq!(first, second);
    }
}

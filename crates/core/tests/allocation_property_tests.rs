//! Property-based integration tests for the splitting core.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wariflex_core::allocation::{allocate, AllocationShare};
use wariflex_core::modes::{amounts_to_percentages, percentages_to_amounts};
use wariflex_core::participants::{total_percentage, Participant};
use wariflex_core::settings::DriftPolicy;
use wariflex_core::shares::{even_split, fill_remaining, set_share_with_policy};

// =============================================================================
// Generators
// =============================================================================

/// A percentage with two decimals in [0, 100].
fn arb_percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// A non-empty share set whose percentages are not all zero.
fn arb_shares(max_count: usize) -> impl Strategy<Value = Vec<AllocationShare>> {
    proptest::collection::vec(arb_percentage(), 1..=max_count)
        .prop_filter("at least one positive share", |pcts| {
            pcts.iter().any(|p| !p.is_zero())
        })
        .prop_map(|pcts| {
            pcts.into_iter()
                .enumerate()
                .map(|(i, pct)| AllocationShare::new(format!("p{}", i), pct))
                .collect()
        })
}

fn arb_total() -> impl Strategy<Value = u64> {
    prop_oneof![
        4 => 0u64..100_000,
        1 => 0u64..=u64::MAX / 1_000_000,
    ]
}

fn arb_participants(max_count: usize) -> impl Strategy<Value = Vec<Participant>> {
    proptest::collection::vec((arb_percentage(), any::<bool>()), 1..=max_count).prop_map(
        |entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (pct, locked))| {
                    let p = Participant::with_id(format!("p{}", i), format!("P{}", i))
                        .with_percentage(pct);
                    if locked {
                        p.locked()
                    } else {
                        p
                    }
                })
                .collect()
        },
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The allocated amounts always sum to the total.
    #[test]
    fn prop_allocation_sums_to_total(total in arb_total(), shares in arb_shares(30)) {
        let allocation = allocate(total, &shares).unwrap();
        prop_assert_eq!(allocation.sum(), total);
        prop_assert_eq!(allocation.entries.len(), shares.len());
    }

    /// Each amount is its exact share rounded down or up, never further.
    #[test]
    fn prop_each_amount_within_one_unit(total in arb_total(), shares in arb_shares(30)) {
        let allocation = allocate(total, &shares).unwrap();
        let sum: Decimal = shares.iter().map(|s| s.percentage).sum();
        for (share, entry) in shares.iter().zip(&allocation.entries) {
            let exact = Decimal::from(total) * share.percentage / sum;
            let floor = exact.floor();
            let amount = Decimal::from(entry.integer_amount);
            prop_assert!(amount == floor || amount == floor + Decimal::ONE);
            prop_assert_eq!(entry.bonus_applied, amount > floor);
        }
    }

    /// Fewer bonus units than participants are ever handed out.
    #[test]
    fn prop_bonus_count_below_participant_count(total in arb_total(), shares in arb_shares(30)) {
        let allocation = allocate(total, &shares).unwrap();
        let bonuses = allocation.entries.iter().filter(|e| e.bonus_applied).count();
        prop_assert!(bonuses < shares.len());
    }

    /// Identical input gives identical output.
    #[test]
    fn prop_allocation_is_deterministic(total in arb_total(), shares in arb_shares(30)) {
        prop_assert_eq!(allocate(total, &shares).unwrap(), allocate(total, &shares).unwrap());
    }

    /// A zero total gives every participant zero.
    #[test]
    fn prop_zero_total_is_all_zero(shares in arb_shares(30)) {
        let allocation = allocate(0, &shares).unwrap();
        prop_assert!(allocation.entries.iter().all(|e| e.integer_amount == 0));
    }

    /// An even split sums to exactly 100 with values floor(100/n) or one more.
    #[test]
    fn prop_even_split_sums_to_hundred(n in 1usize..250) {
        let participants: Vec<Participant> =
            (0..n).map(|i| Participant::with_id(format!("p{}", i), "P")).collect();
        let result = even_split(&participants).unwrap();
        let base = Decimal::from(100 / n as u64);
        prop_assert_eq!(total_percentage(&result), dec!(100));
        prop_assert!(result
            .iter()
            .all(|p| p.percentage == base || p.percentage == base + Decimal::ONE));
    }

    /// Share edits never move a locked share.
    #[test]
    fn prop_set_share_keeps_locked_shares(
        participants in arb_participants(8),
        target in 0usize..8,
        new_pct in arb_percentage(),
        renormalize in any::<bool>(),
    ) {
        let target_id = format!("p{}", target % participants.len());
        let policy = if renormalize { DriftPolicy::Renormalize } else { DriftPolicy::Preserve };
        let result = set_share_with_policy(&participants, &target_id, new_pct, policy);
        prop_assert_eq!(result.len(), participants.len());
        for (before, after) in participants.iter().zip(&result) {
            prop_assert!(after.percentage >= Decimal::ZERO);
            if before.locked && before.id != target_id {
                prop_assert_eq!(before.percentage, after.percentage);
            }
        }
    }

    /// Starting from 100, a renormalizing edit ends at 100 whenever it is applied.
    #[test]
    fn prop_renormalize_keeps_total(n in 2usize..8, target in 0usize..8, new_pct in arb_percentage()) {
        let participants: Vec<Participant> =
            (0..n).map(|i| Participant::with_id(format!("p{}", i), "P")).collect();
        let participants = even_split(&participants).unwrap();
        let target_id = format!("p{}", target % n);
        let result = set_share_with_policy(&participants, &target_id, new_pct, DriftPolicy::Renormalize);
        let drift = (total_percentage(&result) - dec!(100)).abs();
        prop_assert!(drift < dec!(0.000000000001));
    }

    /// Filling the rest leaves locked shares alone and reaches 100.
    #[test]
    fn prop_fill_remaining_reaches_hundred(participants in arb_participants(8)) {
        match fill_remaining(&participants) {
            Ok(result) => {
                if result.iter().any(|p| !p.locked) {
                    let drift = (total_percentage(&result) - dec!(100)).abs();
                    prop_assert!(drift < dec!(0.000000000001));
                }
                for (before, after) in participants.iter().zip(&result) {
                    if before.locked {
                        prop_assert_eq!(before.percentage, after.percentage);
                    }
                }
            }
            Err(_) => {
                let locked: Decimal =
                    participants.iter().filter(|p| p.locked).map(|p| p.percentage).sum();
                prop_assert!(locked > dec!(100));
            }
        }
    }

    /// Amount → percent always closes at exactly 100.
    #[test]
    fn prop_amounts_to_percentages_sum_to_hundred(
        total in 1u64..1_000_000,
        participants in arb_participants(10),
    ) {
        prop_assume!(participants.iter().any(|p| !p.percentage.is_zero()));
        let amounts = percentages_to_amounts(total, &participants).unwrap();
        let result = amounts_to_percentages(total, &participants, &amounts, 2).unwrap();
        prop_assert_eq!(total_percentage(&result), dec!(100));
    }
}

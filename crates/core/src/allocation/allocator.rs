//! Largest-remainder (Hamilton) apportionment of an integer total.
//!
//! Every share is floored, then the whole units left over are handed one at a
//! time to the shares that lost the largest fractional part. Ties keep input
//! order, so identical input always yields the same breakdown.

use log::{debug, error, warn};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::errors::AllocationError;
use crate::participants::Participant;

use super::{Allocation, AllocationEntry, AllocationShare};

/// Splits `total_amount` across `shares` so the parts sum to it exactly.
///
/// Shares are normalized against their actual sum, so a set that drifted away
/// from 100 is still allocated proportionally.
///
/// # Errors
///
/// * `EmptyParticipantSet` - no shares and a positive total.
/// * `PercentageOutOfRange` - a negative percentage.
/// * `ZeroPercentageSum` - every share is zero.
/// * `AllocationInconsistency` - the leftover units fall outside `[0, count]`.
pub fn allocate(
    total_amount: u64,
    shares: &[AllocationShare],
) -> std::result::Result<Allocation, AllocationError> {
    if shares.is_empty() {
        return if total_amount == 0 {
            Ok(Allocation::empty())
        } else {
            Err(AllocationError::EmptyParticipantSet)
        };
    }

    if let Some(negative) = shares.iter().find(|s| s.percentage < Decimal::ZERO) {
        return Err(AllocationError::PercentageOutOfRange {
            participant_id: negative.participant_id.clone(),
            value: negative.percentage.to_string(),
        });
    }

    let percentage_sum: Decimal = shares.iter().map(|s| s.percentage).sum();
    if percentage_sum.is_zero() {
        return Err(AllocationError::ZeroPercentageSum);
    }

    let total = Decimal::from(total_amount);
    let mut floors: Vec<u64> = Vec::with_capacity(shares.len());
    let mut fractions: Vec<Decimal> = Vec::with_capacity(shares.len());

    for share in shares {
        // Multiply before dividing to keep the quotient as exact as possible.
        let raw = total
            .checked_mul(share.percentage)
            .and_then(|scaled| scaled.checked_div(percentage_sum))
            .ok_or_else(|| {
                AllocationError::InvalidAmount(format!(
                    "{} is too large to apportion by {}%",
                    total_amount, share.percentage
                ))
            })?;
        let floor_val = raw.floor();
        let units = floor_val.to_u64().ok_or_else(|| {
            AllocationError::InvalidAmount(format!("share {} does not fit in u64", floor_val))
        })?;
        floors.push(units);
        fractions.push(raw - floor_val);
    }

    let base: u128 = floors.iter().map(|&v| v as u128).sum();
    let remainder = total_amount as i128 - base as i128;
    let count = shares.len();

    check_remainder(remainder, count, total_amount)?;

    let mut order: Vec<usize> = (0..count).collect();
    // `sort_by` is stable: equal fractions keep input order.
    order.sort_by(|&a, &b| fractions[b].cmp(&fractions[a]));

    let mut bonus = vec![false; count];
    for &index in order.iter().take(remainder as usize) {
        bonus[index] = true;
    }

    let entries = shares
        .iter()
        .zip(floors)
        .zip(bonus)
        .map(|((share, floor_val), bonus_applied)| AllocationEntry {
            participant_id: share.participant_id.clone(),
            integer_amount: floor_val + u64::from(bonus_applied),
            bonus_applied,
        })
        .collect();

    debug!(
        "Allocated {} over {} shares, {} remainder unit(s)",
        total_amount, count, remainder
    );

    Ok(Allocation {
        total_amount,
        entries,
    })
}

/// Leftover units must land in `[0, count]`. `count` itself is only possible
/// through rounding in the raw shares and is accepted with a warning.
pub(super) fn check_remainder(
    remainder: i128,
    count: usize,
    total_amount: u64,
) -> std::result::Result<(), AllocationError> {
    if remainder < 0 || remainder > count as i128 {
        error!(
            "Leftover units {} outside [0, {}] allocating {} over {} shares",
            remainder, count, total_amount, count
        );
        return Err(AllocationError::AllocationInconsistency { remainder, count });
    }
    if remainder == count as i128 {
        warn!(
            "Every share lost a whole unit allocating {}; all {} shares receive a bonus",
            total_amount, count
        );
    }
    Ok(())
}

/// Convenience wrapper allocating straight from a participant set.
pub fn allocate_participants(
    total_amount: u64,
    participants: &[Participant],
) -> std::result::Result<Allocation, AllocationError> {
    let shares: Vec<AllocationShare> = participants.iter().map(AllocationShare::from).collect();
    allocate(total_amount, &shares)
}

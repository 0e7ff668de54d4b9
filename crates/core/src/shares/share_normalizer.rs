//! Interactive share editing: set one share, lock shares, fill the rest.
//!
//! All functions take the current set and return a new one. The input is
//! never modified, so callers swap the whole set in one step.

use log::{debug, warn};
use rust_decimal::Decimal;

use crate::constants::FULL_PERCENTAGE;
use crate::errors::{Error, Result, ValidationError};
use crate::participants::Participant;
use crate::settings::DriftPolicy;

/// Sets `target_id`'s share and spreads the change equally over the other
/// unlocked shares, keeping the equal-absorption result as is.
///
/// See [`set_share_with_policy`].
pub fn set_share(
    participants: &[Participant],
    target_id: &str,
    new_percentage: Decimal,
) -> Vec<Participant> {
    set_share_with_policy(participants, target_id, new_percentage, DriftPolicy::Preserve)
}

/// Sets `target_id`'s share to `new_percentage` (clamped to `[0, 100]`).
///
/// The difference is divided equally among the unlocked participants other
/// than the target, each floored at 0. Locked shares never move. If there is
/// no unlocked share left to absorb the change, or the target is unknown,
/// the set is returned unchanged.
///
/// A floor at 0 means some of the difference may go unabsorbed and the total
/// leaves 100. With [`DriftPolicy::Renormalize`] that part is re-spread over
/// the unlocked shares that still hold something, and whatever still cannot
/// be absorbed is taken back from the target.
pub fn set_share_with_policy(
    participants: &[Participant],
    target_id: &str,
    new_percentage: Decimal,
    policy: DriftPolicy,
) -> Vec<Participant> {
    let Some(target) = participants.iter().find(|p| p.id == target_id) else {
        debug!("Ignoring share edit for unknown participant {}", target_id);
        return participants.to_vec();
    };

    let others_count = participants
        .iter()
        .filter(|p| p.id != target_id && !p.locked)
        .count();
    if others_count == 0 {
        debug!(
            "Rejecting share edit for {}: no unlocked share can absorb it",
            target_id
        );
        return participants.to_vec();
    }

    let new_percentage = new_percentage.clamp(Decimal::ZERO, FULL_PERCENTAGE);
    let diff = new_percentage - target.percentage;
    let change_per_other = diff / Decimal::from(others_count);

    let mut absorbed = Decimal::ZERO;
    let mut floored = false;
    let mut result: Vec<Participant> = participants
        .iter()
        .map(|p| {
            if p.id == target_id {
                Participant {
                    percentage: new_percentage,
                    ..p.clone()
                }
            } else if p.locked {
                p.clone()
            } else {
                let unclamped = p.percentage - change_per_other;
                floored |= unclamped < Decimal::ZERO;
                let adjusted = unclamped.max(Decimal::ZERO);
                absorbed += p.percentage - adjusted;
                Participant {
                    percentage: adjusted,
                    ..p.clone()
                }
            }
        })
        .collect();

    let unabsorbed = diff - absorbed;
    if floored && unabsorbed > Decimal::ZERO {
        match policy {
            DriftPolicy::Preserve => {
                warn!(
                    "Share edit for {} left {}% unabsorbed; total drifted from 100",
                    target_id, unabsorbed
                );
            }
            DriftPolicy::Renormalize => {
                renormalize(&mut result, target_id, unabsorbed);
            }
        }
    }

    result
}

/// Spreads `unabsorbed` over unlocked non-target shares that are still above
/// zero, then takes any leftover back from the target.
fn renormalize(participants: &mut [Participant], target_id: &str, unabsorbed: Decimal) {
    let mut remaining = unabsorbed;

    // Every round either absorbs everything or empties at least one share.
    for _ in 0..participants.len() {
        let candidates: Vec<usize> = participants
            .iter()
            .enumerate()
            .filter(|(_, p)| p.id != target_id && !p.locked && p.percentage > Decimal::ZERO)
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() || remaining <= Decimal::ZERO {
            break;
        }

        let per_candidate = remaining / Decimal::from(candidates.len());
        let mut taken_this_round = Decimal::ZERO;
        for index in candidates {
            let take = participants[index].percentage.min(per_candidate);
            participants[index].percentage -= take;
            taken_this_round += take;
        }
        remaining -= taken_this_round;
        if taken_this_round.is_zero() {
            break;
        }
    }

    if remaining > Decimal::ZERO {
        if let Some(target) = participants.iter_mut().find(|p| p.id == target_id) {
            debug!(
                "Renormalize: giving {}% back from {} to keep the total at 100",
                remaining, target_id
            );
            target.percentage = (target.percentage - remaining).max(Decimal::ZERO);
        }
    }
}

/// Flips the lock flag of one participant. Nothing else changes.
pub fn toggle_lock(participants: &[Participant], participant_id: &str) -> Vec<Participant> {
    participants
        .iter()
        .map(|p| {
            if p.id == participant_id {
                Participant {
                    locked: !p.locked,
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect()
}

/// "Distribute rest": gives every unlocked participant an equal part of
/// whatever the locked shares leave of 100.
///
/// Prior unlocked values are discarded, not scaled. With no unlocked
/// participant the set is returned unchanged.
///
/// # Errors
///
/// Returns a validation error when the locked shares already exceed 100.
pub fn fill_remaining(participants: &[Participant]) -> Result<Vec<Participant>> {
    let fixed_total: Decimal = participants
        .iter()
        .filter(|p| p.locked)
        .map(|p| p.percentage)
        .sum();
    let remaining = FULL_PERCENTAGE - fixed_total;
    if remaining < Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "locked shares total {}%, more than 100%",
            fixed_total
        ))));
    }

    let active_count = participants.iter().filter(|p| !p.locked).count();
    if active_count == 0 {
        return Ok(participants.to_vec());
    }

    let each = remaining / Decimal::from(active_count);
    Ok(participants
        .iter()
        .map(|p| {
            if p.locked {
                p.clone()
            } else {
                Participant {
                    percentage: each,
                    ..p.clone()
                }
            }
        })
        .collect())
}

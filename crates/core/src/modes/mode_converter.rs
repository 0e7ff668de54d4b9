//! Conversion between percentage and amount representations of a share set.

use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::allocate_participants;
use crate::constants::FULL_PERCENTAGE;
use crate::errors::AllocationError;
use crate::participants::{round_percentage, Participant};

/// Unit a share is currently edited and displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    #[default]
    Percentage,
    Amount,
}

impl SplitMode {
    pub fn toggled(self) -> Self {
        match self {
            SplitMode::Percentage => SplitMode::Amount,
            SplitMode::Amount => SplitMode::Percentage,
        }
    }
}

/// A participant's share expressed in smallest currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AmountShare {
    pub participant_id: String,
    pub amount: u64,
}

impl AmountShare {
    pub fn new(participant_id: impl Into<String>, amount: u64) -> Self {
        Self {
            participant_id: participant_id.into(),
            amount,
        }
    }
}

/// Percent → amount: the exact integer amounts the allocator would settle on.
pub fn percentages_to_amounts(
    total_amount: u64,
    participants: &[Participant],
) -> std::result::Result<Vec<AmountShare>, AllocationError> {
    let allocation = allocate_participants(total_amount, participants)?;
    Ok(allocation
        .entries
        .into_iter()
        .map(|e| AmountShare::new(e.participant_id, e.integer_amount))
        .collect())
}

/// Amount → percent with `precision` decimal places.
///
/// Every participant but the last gets `round(amount / total * 100)`; the
/// last gets `100 - sum(previous)` so the set sums to exactly 100. This is
/// order dependent, and if the entered amounts overshoot the total the last
/// share can come out negative. Participants with no entry in `amounts`
/// count as 0.
///
/// # Errors
///
/// `InvalidAmount` when `total_amount` is zero.
pub fn amounts_to_percentages(
    total_amount: u64,
    participants: &[Participant],
    amounts: &[AmountShare],
    precision: u32,
) -> std::result::Result<Vec<Participant>, AllocationError> {
    if total_amount == 0 {
        return Err(AllocationError::InvalidAmount(
            "cannot derive percentages from a zero total".to_string(),
        ));
    }

    let by_id: HashMap<&str, u64> = amounts
        .iter()
        .map(|a| (a.participant_id.as_str(), a.amount))
        .collect();
    let total = Decimal::from(total_amount);
    let last_index = participants.len().saturating_sub(1);

    let mut assigned = Decimal::ZERO;
    let result = participants
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let percentage = if index == last_index {
                FULL_PERCENTAGE - assigned
            } else {
                let amount = by_id.get(p.id.as_str()).copied().unwrap_or(0);
                let pct = round_percentage(
                    Decimal::from(amount) / total * FULL_PERCENTAGE,
                    precision,
                );
                assigned += pct;
                pct
            };
            Participant {
                percentage,
                ..p.clone()
            }
        })
        .collect();

    debug!(
        "Converted {} amount(s) against total {} into percentages",
        amounts.len(),
        total_amount
    );
    Ok(result)
}

//! Allocation input and result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::participants::Participant;

/// One participant's percentage share as seen by the allocator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationShare {
    pub participant_id: String,
    pub percentage: Decimal,
}

impl AllocationShare {
    pub fn new(participant_id: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            participant_id: participant_id.into(),
            percentage,
        }
    }
}

impl From<&Participant> for AllocationShare {
    fn from(participant: &Participant) -> Self {
        Self {
            participant_id: participant.id.clone(),
            percentage: participant.percentage,
        }
    }
}

/// Concrete amount owed by one participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    pub participant_id: String,
    /// Smallest currency units owed.
    pub integer_amount: u64,
    /// Whether this participant absorbed one unit of rounding remainder.
    pub bonus_applied: bool,
}

/// Derived breakdown of a total amount; never stored.
///
/// Entries keep the input order and always sum to `total_amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub total_amount: u64,
    pub entries: Vec<AllocationEntry>,
}

impl Allocation {
    pub fn empty() -> Self {
        Self {
            total_amount: 0,
            entries: Vec::new(),
        }
    }

    /// Amount allocated to the given participant, if present.
    pub fn amount_for(&self, participant_id: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.participant_id == participant_id)
            .map(|e| e.integer_amount)
    }

    pub fn sum(&self) -> u64 {
        self.entries.iter().map(|e| e.integer_amount).sum()
    }

    pub fn amounts(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.integer_amount).collect()
    }
}

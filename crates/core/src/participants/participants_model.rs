//! Participant domain models.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One person sharing an expense.
///
/// `percentage` is conceptually in `[0, 100]`. A `locked` share is never
/// touched by automatic redistribution. `linked_identity` is an opaque
/// reference into the identity directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub percentage: Decimal,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub linked_identity: Option<String>,
}

impl Participant {
    /// Creates an unlocked participant with a fresh id and a 0% share.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            percentage: Decimal::ZERO,
            locked: false,
            linked_identity: None,
        }
    }

    /// Creates a participant with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::new(name)
        }
    }

    pub fn with_percentage(mut self, percentage: Decimal) -> Self {
        self.percentage = percentage;
        self
    }

    pub fn with_linked_identity(mut self, identity: impl Into<String>) -> Self {
        self.linked_identity = Some(identity.into());
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

/// Sum of all percentages in the set.
pub fn total_percentage(participants: &[Participant]) -> Decimal {
    participants.iter().map(|p| p.percentage).sum()
}

/// Rounds a percentage half away from zero to `places` decimals.
pub fn round_percentage(value: Decimal, places: u32) -> Decimal {
    value
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Returns a copy of the set with every percentage rounded to `places` decimals.
///
/// This is the representation handed to persistence; the sum may differ from
/// the unrounded sum by a few hundredths.
pub fn round_percentages(participants: &[Participant], places: u32) -> Vec<Participant> {
    participants
        .iter()
        .map(|p| Participant {
            percentage: round_percentage(p.percentage, places),
            ..p.clone()
        })
        .collect()
}

use serde::{Deserialize, Serialize};

use crate::participants::Participant;

use super::even_split::distribute_evenly;

/// How shares react when the participant list changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Shares are recomputed as an even split on every add/remove.
    #[default]
    Even,
    /// Shares are edited by hand and left alone on membership changes.
    Custom,
}

/// Appends `participant`. An even split is recomputed over the new set; a
/// custom split keeps every share as given.
pub fn add_participant(
    participants: &[Participant],
    participant: Participant,
    strategy: SplitStrategy,
) -> Vec<Participant> {
    let mut result = participants.to_vec();
    result.push(participant);
    if strategy == SplitStrategy::Even {
        distribute_evenly(&mut result);
    }
    result
}

/// Removes `participant_id`; unknown ids return the set unchanged.
///
/// An even split is recomputed over whoever is left. In a custom split the
/// freed share is not handed out; use `fill_remaining` for that.
pub fn remove_participant(
    participants: &[Participant],
    participant_id: &str,
    strategy: SplitStrategy,
) -> Vec<Participant> {
    if !participants.iter().any(|p| p.id == participant_id) {
        return participants.to_vec();
    }
    let mut result: Vec<Participant> = participants
        .iter()
        .filter(|p| p.id != participant_id)
        .cloned()
        .collect();
    if strategy == SplitStrategy::Even && !result.is_empty() {
        distribute_evenly(&mut result);
    }
    result
}

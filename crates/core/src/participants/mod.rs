//! Participants module - the share-holder value type and identity lookup.

mod participants_model;
mod participants_traits;

pub use participants_model::{
    round_percentage, round_percentages, total_percentage, Participant,
};
pub use participants_traits::{resolve_display_name, IdentityDirectoryTrait};

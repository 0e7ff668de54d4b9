//! Shares module - editing the percentage set before it is allocated.

mod even_split;
mod membership;
mod share_normalizer;

pub use even_split::even_split;
pub use membership::{add_participant, remove_participant, SplitStrategy};
pub use share_normalizer::{
    fill_remaining, set_share, set_share_with_policy, toggle_lock,
};

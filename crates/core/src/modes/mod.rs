//! Modes module - switching a share set between percent and amount entry.

mod mode_converter;

pub use mode_converter::{
    amounts_to_percentages, percentages_to_amounts, AmountShare, SplitMode,
};

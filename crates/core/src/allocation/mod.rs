//! Allocation module - exact integer apportionment of a total amount.

mod allocation_model;
mod allocator;

pub use allocation_model::{Allocation, AllocationEntry, AllocationShare};
pub use allocator::{allocate, allocate_participants};

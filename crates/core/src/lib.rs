//! Wariflex Core - exact shared-expense splitting.
//!
//! This crate turns percentage shares into integer currency amounts that sum
//! to the recorded total, and keeps share sets consistent while they are
//! edited. The arithmetic modules (`allocation`, `shares`, `modes`) are pure
//! functions over immutable participant sets. Persistence is reached only
//! through the traits in `expenses`, implemented by storage crates.

pub mod allocation;
pub mod constants;
pub mod errors;
pub mod expenses;
pub mod export;
pub mod modes;
pub mod participants;
pub mod settings;
pub mod shares;

pub use allocation::{allocate, allocate_participants, Allocation, AllocationEntry};
pub use participants::Participant;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! JSON file storage implementation for Wariflex.
//!
//! Implements the repository traits defined in `wariflex-core` on top of a
//! single JSON document, the same local store the app persists its expense
//! list into.
//!
//! ```text
//! core (domain, pure allocation)
//!       │
//!       ▼
//! storage-json (this crate)
//!       │
//!       ▼
//! wariflex-storage.json
//! ```

pub mod errors;
pub mod expenses;

pub use errors::StorageError;
pub use expenses::JsonExpenseRepository;

// Re-export from wariflex-core for convenience
pub use wariflex_core::errors::{DatabaseError, Error, Result};

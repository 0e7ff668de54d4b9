//! JSON file storage for expenses.

mod model;
mod repository;

pub use model::{ExpenseStoreDocument, STORE_VERSION};
pub use repository::JsonExpenseRepository;

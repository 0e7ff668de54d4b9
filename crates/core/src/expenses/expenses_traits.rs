//! Expense repository and service traits.
//!
//! These traits define the contract for expense persistence without any
//! storage-specific types, so the store can be swapped freely.

use async_trait::async_trait;

use super::expenses_model::{Expense, NewExpense};
use crate::allocation::Allocation;
use crate::errors::Result;
use crate::participants::Participant;

/// Trait defining the contract for expense repository operations.
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    /// Lists every stored expense, active and settled.
    fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Retrieves an expense by its ID.
    ///
    /// Returns `DatabaseError::NotFound` if it does not exist.
    fn get_expense(&self, expense_id: &str) -> Result<Expense>;

    async fn insert_expense(&self, expense: Expense) -> Result<Expense>;

    /// Replaces a stored expense with the same ID.
    async fn update_expense(&self, expense: Expense) -> Result<Expense>;

    /// Deletes an expense by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete_expense(&self, expense_id: &str) -> Result<usize>;

    /// Deletes every settled expense, returning how many were removed.
    async fn delete_settled(&self) -> Result<usize>;
}

/// Trait for expense service operations.
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn get_active_expenses(&self) -> Result<Vec<Expense>>;
    fn get_settled_expenses(&self) -> Result<Vec<Expense>>;
    fn get_expense(&self, expense_id: &str) -> Result<Expense>;

    /// Exact per-participant amounts for a stored expense.
    fn get_breakdown(&self, expense_id: &str) -> Result<Allocation>;

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn update_participants(
        &self,
        expense_id: &str,
        participants: Vec<Participant>,
    ) -> Result<Expense>;
    async fn settle_expense(&self, expense_id: &str) -> Result<Expense>;
    async fn delete_expense(&self, expense_id: &str) -> Result<usize>;
    async fn clear_history(&self) -> Result<usize>;
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use uuid::Uuid;

use super::expenses_model::{validate_participants, Expense, ExpenseStatus, NewExpense};
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::allocation::{allocate_participants, Allocation};
use crate::constants::FULL_PERCENTAGE;
use crate::errors::{Error, Result, ValidationError};
use crate::participants::{round_percentages, total_percentage, Participant};
use crate::settings::SplitSettings;

/// Service for recording, editing and settling expenses.
///
/// Owns no state of its own: the repository is the single source of truth
/// and every computation goes through the pure allocation functions.
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    settings: SplitSettings,
}

impl ExpenseService {
    pub fn new(repository: Arc<dyn ExpenseRepositoryTrait>, settings: SplitSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Rounds shares for persistence and warns if they do not sum to 100.
    fn prepare_participants(&self, participants: &[Participant]) -> Result<Vec<Participant>> {
        validate_participants(participants)?;
        let rounded = round_percentages(participants, self.settings.percentage_precision);
        let sum = total_percentage(&rounded);
        if sum != FULL_PERCENTAGE {
            warn!(
                "Shares sum to {}% instead of 100%; amounts will be normalized against the actual sum",
                sum
            );
        }
        Ok(rounded)
    }

    fn list_by_status(&self, status: ExpenseStatus) -> Result<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .repository
            .list_expenses()?
            .into_iter()
            .filter(|e| e.status == status)
            .collect();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(expenses)
    }

    fn ensure_active(expense: &Expense, action: &str) -> Result<()> {
        if expense.is_settled() {
            return Err(Error::Validation(ValidationError::InvalidStatusTransition(
                format!("cannot {} settled expense {}", action, expense.id),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn get_active_expenses(&self) -> Result<Vec<Expense>> {
        self.list_by_status(ExpenseStatus::Active)
    }

    fn get_settled_expenses(&self) -> Result<Vec<Expense>> {
        self.list_by_status(ExpenseStatus::Settled)
    }

    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.repository.get_expense(expense_id)
    }

    fn get_breakdown(&self, expense_id: &str) -> Result<Allocation> {
        let expense = self.repository.get_expense(expense_id)?;
        let allocation = allocate_participants(expense.total_amount, &expense.participants)?;
        debug!(
            "Breakdown for expense {}: {:?}",
            expense_id,
            allocation.amounts()
        );
        Ok(allocation)
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        new_expense.validate()?;
        let participants = self.prepare_participants(&new_expense.participants)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            title: new_expense.title.trim().to_string(),
            total_amount: new_expense.total_amount,
            memo: new_expense
                .memo
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            status: ExpenseStatus::Active,
            participants,
            created_at: Utc::now(),
            completed_at: None,
        };
        debug!(
            "Creating expense '{}' ({}) for {} participant(s)",
            expense.title,
            expense.total_amount,
            expense.participants.len()
        );
        self.repository.insert_expense(expense).await
    }

    async fn update_participants(
        &self,
        expense_id: &str,
        participants: Vec<Participant>,
    ) -> Result<Expense> {
        let expense = self.repository.get_expense(expense_id)?;
        Self::ensure_active(&expense, "edit")?;
        let participants = self.prepare_participants(&participants)?;
        self.repository
            .update_expense(Expense {
                participants,
                ..expense
            })
            .await
    }

    async fn settle_expense(&self, expense_id: &str) -> Result<Expense> {
        let expense = self.repository.get_expense(expense_id)?;
        Self::ensure_active(&expense, "settle")?;
        // An allocation that cannot be computed must never become history.
        allocate_participants(expense.total_amount, &expense.participants)?;
        debug!("Settling expense {}", expense_id);
        self.repository
            .update_expense(Expense {
                status: ExpenseStatus::Settled,
                completed_at: Some(Utc::now()),
                ..expense
            })
            .await
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<usize> {
        self.repository.delete_expense(expense_id).await
    }

    async fn clear_history(&self) -> Result<usize> {
        let removed = self.repository.delete_settled().await?;
        debug!("Cleared {} settled expense(s)", removed);
        Ok(removed)
    }
}

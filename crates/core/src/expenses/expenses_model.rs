//! Expense domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::FULL_PERCENTAGE;
use crate::errors::{AllocationError, Error, Result, ValidationError};
use crate::participants::{total_percentage, Participant};

/// Lifecycle state of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Shares may still change.
    #[default]
    Active,
    /// Paid up; the breakdown is history and no longer editable.
    Settled,
}

/// Domain model representing a recorded expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub title: String,
    /// Smallest currency units.
    pub total_amount: u64,
    pub memo: Option<String>,
    pub status: ExpenseStatus,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Expense {
    pub fn is_settled(&self) -> bool {
        self.status == ExpenseStatus::Settled
    }
}

/// Input model for recording a new expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub title: String,
    pub total_amount: u64,
    pub memo: Option<String>,
    pub participants: Vec<Participant>,
}

impl NewExpense {
    /// Validates the new expense data.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        validate_participants(&self.participants)
    }
}

/// Checks a share set is fit to be stored: non-empty, every percentage in
/// `[0, 100]`, and not all zero.
pub fn validate_participants(participants: &[Participant]) -> Result<()> {
    if participants.is_empty() {
        return Err(AllocationError::EmptyParticipantSet.into());
    }
    if let Some(p) = participants
        .iter()
        .find(|p| p.percentage < Decimal::ZERO || p.percentage > FULL_PERCENTAGE)
    {
        return Err(AllocationError::PercentageOutOfRange {
            participant_id: p.id.clone(),
            value: p.percentage.to_string(),
        }
        .into());
    }
    if total_percentage(participants).is_zero() {
        return Err(AllocationError::ZeroPercentageSum.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::errors::{AllocationError, DatabaseError, Error, Result, ValidationError};
    use crate::expenses::{
        Expense, ExpenseRepositoryTrait, ExpenseService, ExpenseServiceTrait, ExpenseStatus,
        NewExpense,
    };
    use crate::participants::Participant;
    use crate::settings::SplitSettings;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use std::sync::{Arc, RwLock};

    // ============== Mock Repository ==============

    #[derive(Default)]
    struct MockExpenseRepository {
        expenses: RwLock<Vec<Expense>>,
    }

    #[async_trait]
    impl ExpenseRepositoryTrait for MockExpenseRepository {
        fn list_expenses(&self) -> Result<Vec<Expense>> {
            Ok(self.expenses.read().unwrap().clone())
        }

        fn get_expense(&self, expense_id: &str) -> Result<Expense> {
            self.expenses
                .read()
                .unwrap()
                .iter()
                .find(|e| e.id == expense_id)
                .cloned()
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(expense_id.to_string())))
        }

        async fn insert_expense(&self, expense: Expense) -> Result<Expense> {
            self.expenses.write().unwrap().push(expense.clone());
            Ok(expense)
        }

        async fn update_expense(&self, expense: Expense) -> Result<Expense> {
            let mut expenses = self.expenses.write().unwrap();
            let slot = expenses
                .iter_mut()
                .find(|e| e.id == expense.id)
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(expense.id.clone())))?;
            *slot = expense.clone();
            Ok(expense)
        }

        async fn delete_expense(&self, expense_id: &str) -> Result<usize> {
            let mut expenses = self.expenses.write().unwrap();
            let before = expenses.len();
            expenses.retain(|e| e.id != expense_id);
            Ok(before - expenses.len())
        }

        async fn delete_settled(&self) -> Result<usize> {
            let mut expenses = self.expenses.write().unwrap();
            let before = expenses.len();
            expenses.retain(|e| e.status != ExpenseStatus::Settled);
            Ok(before - expenses.len())
        }
    }

    fn service() -> (ExpenseService, Arc<MockExpenseRepository>) {
        let repository = Arc::new(MockExpenseRepository::default());
        (
            ExpenseService::new(repository.clone(), SplitSettings::default()),
            repository,
        )
    }

    fn dinner() -> NewExpense {
        NewExpense {
            title: "  Izakaya night ".to_string(),
            total_amount: 10_000,
            memo: Some("  ".to_string()),
            participants: vec![
                Participant::with_id("a", "Aoi").with_percentage(dec!(100) / dec!(3)),
                Participant::with_id("b", "Ren").with_percentage(dec!(100) / dec!(3)),
                Participant::with_id("c", "Yui").with_percentage(dec!(33.34)),
            ],
        }
    }

    // ============== create_expense ==============

    #[tokio::test]
    async fn test_create_expense_rounds_and_trims() {
        let (service, repository) = service();
        let expense = service.create_expense(dinner()).await.unwrap();

        assert_eq!(expense.title, "Izakaya night");
        assert_eq!(expense.memo, None);
        assert_eq!(expense.status, ExpenseStatus::Active);
        assert!(expense.completed_at.is_none());
        assert_eq!(expense.participants[0].percentage, dec!(33.33));
        assert_eq!(expense.participants[1].percentage, dec!(33.33));
        assert_eq!(expense.participants[2].percentage, dec!(33.34));
        assert_eq!(repository.list_expenses().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_expense_validation() {
        let (service, _) = service();

        let mut untitled = dinner();
        untitled.title = " ".to_string();
        assert!(matches!(
            service.create_expense(untitled).await.unwrap_err(),
            Error::Validation(ValidationError::MissingField(_))
        ));

        let mut nobody = dinner();
        nobody.participants.clear();
        assert!(matches!(
            service.create_expense(nobody).await.unwrap_err(),
            Error::Allocation(AllocationError::EmptyParticipantSet)
        ));

        let mut zeros = dinner();
        zeros.participants.iter_mut().for_each(|p| p.percentage = dec!(0));
        assert!(matches!(
            service.create_expense(zeros).await.unwrap_err(),
            Error::Allocation(AllocationError::ZeroPercentageSum)
        ));

        let mut too_big = dinner();
        too_big.participants[0].percentage = dec!(101);
        assert!(matches!(
            service.create_expense(too_big).await.unwrap_err(),
            Error::Allocation(AllocationError::PercentageOutOfRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_expense_tolerates_sum_off_hundred() {
        let (service, _) = service();
        let mut drifted = dinner();
        drifted.participants[2].percentage = dec!(40);
        let expense = service.create_expense(drifted).await.unwrap();
        let breakdown = service.get_breakdown(&expense.id).unwrap();
        assert_eq!(breakdown.sum(), 10_000);
    }

    // ============== breakdown ==============

    #[tokio::test]
    async fn test_get_breakdown_is_exact() {
        let (service, _) = service();
        let expense = service.create_expense(dinner()).await.unwrap();
        let breakdown = service.get_breakdown(&expense.id).unwrap();
        assert_eq!(breakdown.amounts(), vec![3333, 3333, 3334]);
        assert_eq!(breakdown.sum(), expense.total_amount);
    }

    #[tokio::test]
    async fn test_get_breakdown_unknown_expense() {
        let (service, _) = service();
        assert!(matches!(
            service.get_breakdown("missing").unwrap_err(),
            Error::Database(DatabaseError::NotFound(_))
        ));
    }

    // ============== lifecycle ==============

    #[tokio::test]
    async fn test_settle_moves_expense_to_history() {
        let (service, _) = service();
        let expense = service.create_expense(dinner()).await.unwrap();

        let settled = service.settle_expense(&expense.id).await.unwrap();
        assert_eq!(settled.status, ExpenseStatus::Settled);
        assert!(settled.completed_at.is_some());

        assert!(service.get_active_expenses().unwrap().is_empty());
        assert_eq!(service.get_settled_expenses().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_settled_expense_is_immutable() {
        let (service, _) = service();
        let expense = service.create_expense(dinner()).await.unwrap();
        service.settle_expense(&expense.id).await.unwrap();

        assert!(matches!(
            service.settle_expense(&expense.id).await.unwrap_err(),
            Error::Validation(ValidationError::InvalidStatusTransition(_))
        ));
        assert!(matches!(
            service
                .update_participants(&expense.id, expense.participants.clone())
                .await
                .unwrap_err(),
            Error::Validation(ValidationError::InvalidStatusTransition(_))
        ));
    }

    #[tokio::test]
    async fn test_settle_refuses_unallocatable_expense() {
        let (service, repository) = service();
        let now = Utc::now();
        repository
            .insert_expense(Expense {
                id: "broken".to_string(),
                title: "Broken".to_string(),
                total_amount: 500,
                memo: None,
                status: ExpenseStatus::Active,
                participants: vec![Participant::with_id("a", "A")],
                created_at: now,
                completed_at: None,
            })
            .await
            .unwrap();

        assert!(matches!(
            service.settle_expense("broken").await.unwrap_err(),
            Error::Allocation(AllocationError::ZeroPercentageSum)
        ));
        assert_eq!(
            repository.get_expense("broken").unwrap().status,
            ExpenseStatus::Active
        );
    }

    #[tokio::test]
    async fn test_update_participants() {
        let (service, _) = service();
        let expense = service.create_expense(dinner()).await.unwrap();
        let updated = service
            .update_participants(
                &expense.id,
                vec![
                    Participant::with_id("a", "Aoi").with_percentage(dec!(70)),
                    Participant::with_id("b", "Ren").with_percentage(dec!(30)),
                ],
            )
            .await
            .unwrap();
        assert_eq!(updated.participants.len(), 2);
        assert_eq!(service.get_breakdown(&expense.id).unwrap().amounts(), vec![7000, 3000]);
    }

    #[tokio::test]
    async fn test_lists_are_newest_first() {
        let (service, repository) = service();
        let base = service.create_expense(dinner()).await.unwrap();
        let mut older = base.clone();
        older.id = "older".to_string();
        older.created_at = base.created_at - Duration::days(1);
        repository.insert_expense(older).await.unwrap();

        let active = service.get_active_expenses().unwrap();
        assert_eq!(active[0].id, base.id);
        assert_eq!(active[1].id, "older");
    }

    #[tokio::test]
    async fn test_delete_and_clear_history() {
        let (service, _) = service();
        let first = service.create_expense(dinner()).await.unwrap();
        let second = service.create_expense(dinner()).await.unwrap();
        let third = service.create_expense(dinner()).await.unwrap();
        service.settle_expense(&first.id).await.unwrap();
        service.settle_expense(&second.id).await.unwrap();

        assert_eq!(service.clear_history().await.unwrap(), 2);
        assert_eq!(service.get_settled_expenses().unwrap().len(), 0);

        assert_eq!(service.delete_expense(&third.id).await.unwrap(), 1);
        assert_eq!(service.delete_expense(&third.id).await.unwrap(), 0);
        assert!(service.get_active_expenses().unwrap().is_empty());
    }
}

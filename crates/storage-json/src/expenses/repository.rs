use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use log::{debug, info};
use wariflex_core::errors::{DatabaseError, Error};
use wariflex_core::expenses::{Expense, ExpenseRepositoryTrait, ExpenseStatus};
use wariflex_core::Result;

use super::model::{ExpenseStoreDocument, STORE_VERSION};
use crate::errors::StorageError;

/// Expense repository backed by a single JSON document on disk.
///
/// Reads are served from memory. Every write builds the next document,
/// persists it (temp file + rename) and only then swaps it in, so a failed
/// write leaves both the file and the in-memory state untouched.
pub struct JsonExpenseRepository {
    path: PathBuf,
    state: RwLock<ExpenseStoreDocument>,
}

impl JsonExpenseRepository {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// A document written with any other store version is rejected.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let raw = fs::read(&path).map_err(StorageError::from)?;
            let document: ExpenseStoreDocument =
                serde_json::from_slice(&raw).map_err(StorageError::from)?;
            if document.version != STORE_VERSION {
                return Err(StorageError::UnsupportedVersion {
                    found: document.version,
                    expected: STORE_VERSION,
                }
                .into());
            }
            info!(
                "Loaded {} expense(s) from {}",
                document.expenses.len(),
                path.display()
            );
            document
        } else {
            debug!("No store at {}, starting empty", path.display());
            ExpenseStoreDocument::default()
        };

        Ok(Self {
            path,
            state: RwLock::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&ExpenseStoreDocument) -> Result<T>) -> Result<T> {
        let guard = self.state.read().map_err(|_| StorageError::LockPoisoned)?;
        f(&guard)
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut ExpenseStoreDocument) -> Result<T>) -> Result<T> {
        let mut guard = self.state.write().map_err(|_| StorageError::LockPoisoned)?;
        let mut next = guard.clone();
        let value = f(&mut next)?;
        self.write_document(&next)?;
        *guard = next;
        Ok(value)
    }

    fn write_document(&self, document: &ExpenseStoreDocument) -> std::result::Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(document)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn not_found(expense_id: &str) -> Error {
    Error::Database(DatabaseError::NotFound(format!("expense {}", expense_id)))
}

#[async_trait]
impl ExpenseRepositoryTrait for JsonExpenseRepository {
    fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.read(|doc| Ok(doc.expenses.clone()))
    }

    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.read(|doc| {
            doc.expenses
                .iter()
                .find(|e| e.id == expense_id)
                .cloned()
                .ok_or_else(|| not_found(expense_id))
        })
    }

    async fn insert_expense(&self, expense: Expense) -> Result<Expense> {
        self.mutate(|doc| {
            if doc.expenses.iter().any(|e| e.id == expense.id) {
                return Err(Error::Database(DatabaseError::QueryFailed(format!(
                    "expense {} already exists",
                    expense.id
                ))));
            }
            doc.expenses.push(expense.clone());
            Ok(expense)
        })
    }

    async fn update_expense(&self, expense: Expense) -> Result<Expense> {
        self.mutate(|doc| {
            let slot = doc
                .expenses
                .iter_mut()
                .find(|e| e.id == expense.id)
                .ok_or_else(|| not_found(&expense.id))?;
            *slot = expense.clone();
            Ok(expense)
        })
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<usize> {
        self.mutate(|doc| {
            let before = doc.expenses.len();
            doc.expenses.retain(|e| e.id != expense_id);
            Ok(before - doc.expenses.len())
        })
    }

    async fn delete_settled(&self) -> Result<usize> {
        self.mutate(|doc| {
            let before = doc.expenses.len();
            doc.expenses.retain(|e| e.status != ExpenseStatus::Settled);
            Ok(before - doc.expenses.len())
        })
    }
}

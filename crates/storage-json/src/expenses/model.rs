//! On-disk layout of the expense store.

use serde::{Deserialize, Serialize};
use wariflex_core::expenses::Expense;

pub const STORE_VERSION: u32 = 1;

/// Whole-file document. The file is always rewritten in full.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStoreDocument {
    pub version: u32,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Default for ExpenseStoreDocument {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            expenses: Vec::new(),
        }
    }
}

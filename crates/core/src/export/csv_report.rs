//! CSV rendering of an expense breakdown.

use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::Allocation;
use crate::constants::{CSV_HEADERS, UTF8_BOM};
use crate::errors::{Error, Result};
use crate::expenses::Expense;
use crate::participants::{resolve_display_name, IdentityDirectoryTrait};
use crate::settings::SplitSettings;

/// One line of the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub name: String,
    pub percentage: Decimal,
    pub amount: u64,
}

/// An expense's breakdown ready for export, rows in participant order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    pub title: String,
    pub total_amount: u64,
    pub rows: Vec<ReportRow>,
}

impl ExpenseReport {
    /// Pairs each participant with its allocated amount.
    ///
    /// Fails if `allocation` was not computed for this expense's participants.
    pub fn build(
        expense: &Expense,
        allocation: &Allocation,
        directory: Option<&dyn IdentityDirectoryTrait>,
    ) -> Result<Self> {
        let rows = expense
            .participants
            .iter()
            .map(|p| -> Result<ReportRow> {
                let amount = allocation.amount_for(&p.id).ok_or_else(|| {
                    Error::Export(format!(
                        "no allocated amount for participant {} of expense {}",
                        p.id, expense.id
                    ))
                })?;
                Ok(ReportRow {
                    name: resolve_display_name(p, directory),
                    percentage: p.percentage,
                    amount,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            title: expense.title.clone(),
            total_amount: allocation.total_amount,
            rows,
        })
    }
}

/// Renders the report as CSV: a header row, then `name,percentage,amount`.
pub fn render_csv(report: &ExpenseReport, settings: &SplitSettings) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for row in &report.rows {
        writer.write_record([
            row.name.clone(),
            row.percentage.normalize().to_string(),
            row.amount.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    let body = String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))?;

    Ok(if settings.csv_bom {
        format!("{}{}", UTF8_BOM, body)
    } else {
        body
    })
}

/// `<title>_history.csv`, with characters that would break a path replaced.
pub fn export_file_name(expense: &Expense) -> String {
    let stem: String = expense
        .title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    format!("{}_history.csv", stem)
}

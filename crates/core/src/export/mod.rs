//! Export module - textual reports of exact breakdowns.

mod csv_report;

pub use csv_report::{export_file_name, render_csv, ExpenseReport, ReportRow};

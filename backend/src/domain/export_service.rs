//! Export service domain logic for the spending tracker.
//!
//! Expenses are rendered as CSV text by plain string joining. Text columns
//! are always quoted and numeric columns never are.

use chrono::NaiveDate;
use shared::ExpenseFilters;
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::expense_service::ExpenseService;
use crate::domain::models::{Expense, DATE_FORMAT};

pub const CSV_HEADER: &str = "Date,Amount,Category,Payment Method,Description";

/// Rendered CSV ready to download
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub row_count: usize,
}

#[derive(Clone)]
pub struct ExportService {
    expense_service: ExpenseService,
}

impl ExportService {
    pub fn new(expense_service: ExpenseService) -> Self {
        Self { expense_service }
    }

    /// Export the user's expenses matching `filters`, newest first
    pub async fn export_expenses_csv(
        &self,
        user_id: &str,
        filters: &ExpenseFilters,
        today: NaiveDate,
    ) -> Result<CsvExport, DomainError> {
        let expenses = self.expense_service.list_expenses(user_id, filters).await?;
        let export = CsvExport {
            filename: export_filename(today),
            content: expenses_to_csv(&expenses),
            row_count: expenses.len(),
        };
        info!(user_id, rows = export.row_count, filename = %export.filename, "Exported expenses");
        Ok(export)
    }
}

pub fn expenses_to_csv(expenses: &[Expense]) -> String {
    let mut lines = Vec::with_capacity(expenses.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for expense in expenses {
        lines.push(format!(
            "{},{},{},{},{}",
            expense.date.format(DATE_FORMAT),
            expense.amount,
            quote(expense.category.as_str()),
            quote(expense.payment_method.as_str()),
            quote(expense.description.as_deref().unwrap_or("")),
        ));
    }
    lines.join("\n")
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("expenses-{}.csv", today.format(DATE_FORMAT))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

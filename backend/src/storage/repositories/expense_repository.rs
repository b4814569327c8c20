use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::{Expense, ExpenseCategory, ExpenseQuery, PaymentMethod, DATE_FORMAT};
use crate::storage::{connection::DbConnection, StorageError};

const EXPENSE_COLUMNS: &str =
    "id, user_id, amount, category, date, description, payment_method, created_at, updated_at";

/// Repository for expense rows
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_expense(&self, expense: &Expense) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, amount, category, date, description, payment_method, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.user_id)
        .bind(expense.amount)
        .bind(expense.category.as_str())
        .bind(expense.date.format(DATE_FORMAT).to_string())
        .bind(&expense.description)
        .bind(expense.payment_method.as_str())
        .bind(&expense.created_at)
        .bind(&expense.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Option<Expense>, StorageError> {
        let sql = format!("SELECT {} FROM expenses WHERE id = ? AND user_id = ?", EXPENSE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(expense_id)
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(map_expense_row).transpose()
    }

    /// List a user's expenses matching `query`, newest date first
    pub async fn list_expenses(&self, user_id: &str, query: &ExpenseQuery) -> Result<Vec<Expense>, StorageError> {
        let mut sql = format!("SELECT {} FROM expenses WHERE user_id = ?", EXPENSE_COLUMNS);
        let mut params: Vec<String> = Vec::new();

        if let Some(start) = query.start_date {
            sql.push_str(" AND date >= ?");
            params.push(start.format(DATE_FORMAT).to_string());
        }
        if let Some(end) = query.end_date {
            sql.push_str(" AND date <= ?");
            params.push(end.format(DATE_FORMAT).to_string());
        }
        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            params.push(category.as_str().to_string());
        }
        if let Some(method) = query.payment_method {
            sql.push_str(" AND payment_method = ?");
            params.push(method.as_str().to_string());
        }
        sql.push_str(" ORDER BY date DESC, created_at DESC, ROWID DESC");

        let mut statement = sqlx::query(&sql).bind(user_id);
        for param in &params {
            statement = statement.bind(param);
        }

        let rows = statement.fetch_all(self.db.pool()).await?;
        rows.iter().map(map_expense_row).collect()
    }

    /// Overwrite every mutable column; returns false when the expense does
    /// not belong to the user
    pub async fn update_expense(&self, expense: &Expense) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET amount = ?, category = ?, date = ?, description = ?, payment_method = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(expense.amount)
        .bind(expense.category.as_str())
        .bind(expense.date.format(DATE_FORMAT).to_string())
        .bind(&expense.description)
        .bind(expense.payment_method.as_str())
        .bind(&expense.updated_at)
        .bind(&expense.id)
        .bind(&expense.user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ? AND user_id = ?")
            .bind(expense_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_expense_row(row: &SqliteRow) -> Result<Expense, StorageError> {
    let id: String = row.try_get("id")?;

    let category: String = row.try_get("category")?;
    let category = ExpenseCategory::parse(&category).map_err(|e| StorageError::corrupt("expenses", &id, e))?;

    let payment_method: String = row.try_get("payment_method")?;
    let payment_method =
        PaymentMethod::parse(&payment_method).map_err(|e| StorageError::corrupt("expenses", &id, e))?;

    let date: String = row.try_get("date")?;
    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| StorageError::corrupt("expenses", &id, e))?;

    Ok(Expense {
        user_id: row.try_get("user_id")?,
        amount: row.try_get("amount")?,
        category,
        date,
        description: row.try_get("description")?,
        payment_method,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        id,
    })
}

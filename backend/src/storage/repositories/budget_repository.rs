use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::{Budget, BudgetMonth, ExpenseCategory};
use crate::storage::{connection::DbConnection, StorageError};

const BUDGET_COLUMNS: &str = "id, user_id, amount, category, month, created_at, updated_at";

/// Repository for budget rows
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_budget(&self, budget: &Budget) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO budgets (id, user_id, amount, category, month, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&budget.id)
        .bind(&budget.user_id)
        .bind(budget.amount)
        .bind(budget.category.as_str())
        .bind(budget.month.to_string())
        .bind(&budget.created_at)
        .bind(&budget.updated_at)
        .execute(self.db.pool())
        .await
        .map_err(|e| StorageError::from_write(e, format!("{} budget for {}", budget.category, budget.month)))?;
        Ok(())
    }

    pub async fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Option<Budget>, StorageError> {
        let sql = format!("SELECT {} FROM budgets WHERE id = ? AND user_id = ?", BUDGET_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(budget_id)
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(map_budget_row).transpose()
    }

    /// The user's budget for a (category, month) pair, if one exists
    pub async fn find_budget(
        &self,
        user_id: &str,
        category: ExpenseCategory,
        month: BudgetMonth,
    ) -> Result<Option<Budget>, StorageError> {
        let sql = format!(
            "SELECT {} FROM budgets WHERE user_id = ? AND category = ? AND month = ?",
            BUDGET_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(user_id)
            .bind(category.as_str())
            .bind(month.to_string())
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(map_budget_row).transpose()
    }

    /// All of a user's budgets for one month, ordered by category name
    pub async fn list_budgets_for_month(&self, user_id: &str, month: BudgetMonth) -> Result<Vec<Budget>, StorageError> {
        let sql = format!(
            "SELECT {} FROM budgets WHERE user_id = ? AND month = ? ORDER BY category ASC, created_at ASC",
            BUDGET_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(month.to_string())
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(map_budget_row).collect()
    }

    pub async fn update_budget(&self, budget: &Budget) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE budgets
            SET amount = ?, category = ?, month = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(budget.amount)
        .bind(budget.category.as_str())
        .bind(budget.month.to_string())
        .bind(&budget.updated_at)
        .bind(&budget.id)
        .bind(&budget.user_id)
        .execute(self.db.pool())
        .await
        .map_err(|e| StorageError::from_write(e, format!("{} budget for {}", budget.category, budget.month)))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a budget and detach the alerts that pointed at it, atomically
    pub async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<bool, StorageError> {
        let mut tx = self.db.pool().begin().await?;

        let deleted = sqlx::query("DELETE FROM budgets WHERE id = ? AND user_id = ?")
            .bind(budget_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            sqlx::query("UPDATE budget_alerts SET budget_id = NULL WHERE budget_id = ? AND user_id = ?")
                .bind(budget_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }
}

fn map_budget_row(row: &SqliteRow) -> Result<Budget, StorageError> {
    let id: String = row.try_get("id")?;

    let category: String = row.try_get("category")?;
    let category = ExpenseCategory::parse(&category).map_err(|e| StorageError::corrupt("budgets", &id, e))?;

    let month: String = row.try_get("month")?;
    let month = BudgetMonth::parse(&month).map_err(|e| StorageError::corrupt("budgets", &id, e))?;

    Ok(Budget {
        user_id: row.try_get("user_id")?,
        amount: row.try_get("amount")?,
        category,
        month,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        id,
    })
}

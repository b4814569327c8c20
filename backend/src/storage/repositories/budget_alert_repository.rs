use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::{AlertKind, BudgetAlert};
use crate::storage::{connection::DbConnection, StorageError};

const ALERT_COLUMNS: &str = "id, user_id, budget_id, type, message, is_read, created_at";

/// Repository for budget alert rows.
///
/// Rows are insert-only apart from the read flag, which can only be set.
#[derive(Clone)]
pub struct BudgetAlertRepository {
    db: DbConnection,
}

impl BudgetAlertRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert the alert unless its budget already has an unread alert of the
    /// same type. Returns whether a row was written.
    pub async fn store_alert(&self, alert: &BudgetAlert) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO budget_alerts (id, user_id, budget_id, type, message, is_read, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&alert.id)
        .bind(&alert.user_id)
        .bind(&alert.budget_id)
        .bind(alert.kind.as_str())
        .bind(&alert.message)
        .bind(alert.is_read)
        .bind(&alert.created_at)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_alert(&self, user_id: &str, alert_id: &str) -> Result<Option<BudgetAlert>, StorageError> {
        let sql = format!("SELECT {} FROM budget_alerts WHERE id = ? AND user_id = ?", ALERT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(alert_id)
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(map_alert_row).transpose()
    }

    /// Most recent alerts first
    pub async fn list_alerts(&self, user_id: &str, limit: u32) -> Result<Vec<BudgetAlert>, StorageError> {
        let sql = format!(
            "SELECT {} FROM budget_alerts WHERE user_id = ? ORDER BY created_at DESC, ROWID DESC LIMIT ?",
            ALERT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(limit as i64)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(map_alert_row).collect()
    }

    pub async fn count_unread(&self, user_id: &str) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS unread FROM budget_alerts WHERE user_id = ? AND is_read = 0")
            .bind(user_id)
            .fetch_one(self.db.pool())
            .await?;
        let unread: i64 = row.try_get("unread")?;
        Ok(unread.max(0) as u64)
    }

    /// Returns false when no alert with this id belongs to the user
    pub async fn mark_read(&self, user_id: &str, alert_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE budget_alerts SET is_read = 1 WHERE id = ? AND user_id = ?")
            .bind(alert_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Mark every unread alert of the user as read, returning how many changed
    pub async fn mark_all_read(&self, user_id: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("UPDATE budget_alerts SET is_read = 1 WHERE user_id = ? AND is_read = 0")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_alert_row(row: &SqliteRow) -> Result<BudgetAlert, StorageError> {
    let id: String = row.try_get("id")?;

    let kind: String = row.try_get("type")?;
    let kind = AlertKind::parse(&kind).map_err(|e| StorageError::corrupt("budget_alerts", &id, e))?;

    Ok(BudgetAlert {
        user_id: row.try_get("user_id")?,
        budget_id: row.try_get("budget_id")?,
        kind,
        message: row.try_get("message")?,
        is_read: row.try_get("is_read")?,
        created_at: row.try_get("created_at")?,
        id,
    })
}

use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use crate::storage::StorageError;

/// DbConnection owns the SQLite pool shared by every repository
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and make sure the
    /// schema exists
    pub async fn new(url: &str) -> Result<Self, StorageError> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!(url, "Creating database");
            Sqlite::create_database(url).await?;
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Private in-memory database for a single test.
    ///
    /// The pool is pinned to one connection that never expires, since every
    /// new SQLite memory connection would start from an empty database.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self, StorageError> {
        use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT,
                payment_method TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Budget and dashboard queries always filter by user and date range
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_user_date
            ON expenses(user_id, date DESC);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS budgets (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL,
                month TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (user_id, category, month)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_budgets_user_month
            ON budgets(user_id, month);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS budget_alerts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                budget_id TEXT,
                type TEXT NOT NULL CHECK (type IN ('threshold', 'over_budget', 'monthly_summary')),
                message TEXT NOT NULL,
                is_read BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_budget_alerts_user_created
            ON budget_alerts(user_id, created_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        // At most one unread alert per (user, budget, type). Databases created
        // before the constraint existed may hold duplicates; only the oldest
        // of each group stays unread.
        sqlx::query("DROP INDEX IF EXISTS idx_budget_alerts_budget_unread;")
            .execute(pool)
            .await?;

        sqlx::query(
            r#"
            UPDATE budget_alerts SET is_read = 1
            WHERE is_read = 0 AND budget_id IS NOT NULL AND ROWID NOT IN (
                SELECT MIN(ROWID) FROM budget_alerts
                WHERE is_read = 0 AND budget_id IS NOT NULL
                GROUP BY user_id, budget_id, type
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_budget_alerts_one_unread
            ON budget_alerts(user_id, budget_id, type) WHERE is_read = 0;
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
